use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, Set,
};

use crate::domain::{
    Amenities, CreatePublishedReservationDto, DomainError, DomainResult, PublishedReservation,
    PublishedReservationRepository,
};
use crate::infrastructure::database::entities::published_reservation;
use crate::shared::errors::db_err;

pub struct SeaOrmPublishedReservationRepository {
    db: DatabaseConnection,
}

impl SeaOrmPublishedReservationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(model: published_reservation::Model) -> PublishedReservation {
    PublishedReservation {
        id: model.id,
        hotelier_id: model.hotelier_id,
        name: model.name,
        rooms: model.rooms,
        people: model.people,
        price: model.price,
        amenities: Amenities {
            wifi: model.wifi,
            breakfast: model.breakfast,
            air_conditioner: model.air_conditioner,
            parking: model.parking,
            room_service: model.room_service,
        },
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

#[async_trait]
impl PublishedReservationRepository for SeaOrmPublishedReservationRepository {
    async fn create(
        &self,
        dto: CreatePublishedReservationDto,
    ) -> DomainResult<PublishedReservation> {
        let now = Utc::now();

        let new_reservation = published_reservation::ActiveModel {
            id: NotSet,
            hotelier_id: Set(dto.hotelier_id),
            name: Set(dto.name),
            rooms: Set(dto.rooms),
            people: Set(dto.people),
            price: Set(dto.price),
            wifi: Set(dto.amenities.wifi),
            breakfast: Set(dto.amenities.breakfast),
            air_conditioner: Set(dto.amenities.air_conditioner),
            parking: Set(dto.amenities.parking),
            room_service: Set(dto.amenities.room_service),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = new_reservation.insert(&self.db).await.map_err(|e| {
            if let Some(sea_orm::SqlErr::ForeignKeyConstraintViolation(_)) = e.sql_err() {
                DomainError::not_found("Hotelier", dto.hotelier_id)
            } else {
                db_err(e)
            }
        })?;

        Ok(model_to_domain(model))
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<PublishedReservation>> {
        let model = published_reservation::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(model_to_domain))
    }

    async fn list_by_hotelier(&self, hotelier_id: i32) -> DomainResult<Vec<PublishedReservation>> {
        let models = published_reservation::Entity::find()
            .filter(published_reservation::Column::HotelierId.eq(hotelier_id))
            .order_by_desc(published_reservation::Column::CreatedAt)
            .order_by_desc(published_reservation::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn list_all(&self) -> DomainResult<Vec<PublishedReservation>> {
        let models = published_reservation::Entity::find()
            .order_by_desc(published_reservation::Column::CreatedAt)
            .order_by_desc(published_reservation::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        let result = published_reservation::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        if result.rows_affected == 0 {
            return Err(DomainError::not_found("PublishedReservation", id));
        }

        Ok(())
    }
}
