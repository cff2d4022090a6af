use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, Condition, DatabaseConnection,
    EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::domain::{
    CreateHotelierDto, DomainError, DomainResult, Hotelier, HotelierRepository, UpdateHotelierDto,
};
use crate::infrastructure::database::entities::hotelier;
use crate::shared::errors::{db_err, map_db_err};

const DUPLICATE_MSG: &str = "Email or username already in use";

pub struct SeaOrmHotelierRepository {
    db: DatabaseConnection,
}

impl SeaOrmHotelierRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(model: hotelier::Model) -> Hotelier {
    Hotelier {
        id: model.id,
        name: model.name,
        email: model.email,
        username: model.username,
        password_hash: model.password_hash,
        phone: model.phone,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

#[async_trait]
impl HotelierRepository for SeaOrmHotelierRepository {
    async fn create(&self, dto: CreateHotelierDto) -> DomainResult<Hotelier> {
        let now = Utc::now();

        let new_hotelier = hotelier::ActiveModel {
            id: NotSet,
            name: Set(dto.name),
            email: Set(dto.email),
            username: Set(dto.username),
            password_hash: Set(dto.password_hash),
            phone: Set(dto.phone),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = new_hotelier
            .insert(&self.db)
            .await
            .map_err(|e| map_db_err(e, DUPLICATE_MSG))?;

        Ok(model_to_domain(model))
    }

    async fn find_by_email_or_username(
        &self,
        email: &str,
        username: &str,
    ) -> DomainResult<Option<Hotelier>> {
        let model = hotelier::Entity::find()
            .filter(
                Condition::any()
                    .add(hotelier::Column::Email.eq(email))
                    .add(hotelier::Column::Username.eq(username)),
            )
            .order_by_asc(hotelier::Column::Id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(model_to_domain))
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Hotelier>> {
        let model = hotelier::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(model_to_domain))
    }

    async fn list_all(&self) -> DomainResult<Vec<Hotelier>> {
        let models = hotelier::Entity::find()
            .order_by_asc(hotelier::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn update(&self, id: i32, dto: UpdateHotelierDto) -> DomainResult<Hotelier> {
        let existing = hotelier::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or_else(|| DomainError::not_found("Hotelier", id))?;

        if dto.is_empty() {
            return Ok(model_to_domain(existing));
        }

        let mut active: hotelier::ActiveModel = existing.into();

        if let Some(name) = dto.name {
            active.name = Set(name);
        }
        if let Some(email) = dto.email {
            active.email = Set(email);
        }
        if let Some(username) = dto.username {
            active.username = Set(username);
        }
        if let Some(password_hash) = dto.password_hash {
            active.password_hash = Set(password_hash);
        }
        if let Some(phone) = dto.phone {
            active.phone = Set(Some(phone));
        }
        active.updated_at = Set(Utc::now());

        let updated = active
            .update(&self.db)
            .await
            .map_err(|e| map_db_err(e, DUPLICATE_MSG))?;

        Ok(model_to_domain(updated))
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        let result = hotelier::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Hotelier", id));
        }

        Ok(())
    }
}
