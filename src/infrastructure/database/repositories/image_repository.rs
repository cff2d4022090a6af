use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    ModelTrait, QueryFilter, Set, TransactionTrait,
};

use crate::domain::{DomainError, DomainResult, ImageRepository, NewImage, ReservationImage};
use crate::infrastructure::database::entities::image;
use crate::shared::errors::db_err;

pub struct SeaOrmImageRepository {
    db: DatabaseConnection,
}

impl SeaOrmImageRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(model: image::Model) -> ReservationImage {
    ReservationImage {
        id: model.id,
        published_reservation_id: model.published_reservation_id,
        file_name: model.file_name,
        content_type: model.content_type,
        size_bytes: model.size_bytes,
        path: model.path,
        created_at: model.created_at,
    }
}

#[async_trait]
impl ImageRepository for SeaOrmImageRepository {
    async fn replace_for_reservation(
        &self,
        new_image: NewImage,
    ) -> DomainResult<(ReservationImage, Option<ReservationImage>)> {
        let reservation_id = new_image.published_reservation_id;
        let txn = self.db.begin().await.map_err(db_err)?;

        let previous = image::Entity::find()
            .filter(image::Column::PublishedReservationId.eq(reservation_id))
            .one(&txn)
            .await
            .map_err(db_err)?;

        if let Some(ref old) = previous {
            old.clone().delete(&txn).await.map_err(db_err)?;
        }

        let model = image::ActiveModel {
            id: NotSet,
            published_reservation_id: Set(reservation_id),
            file_name: Set(new_image.file_name),
            content_type: Set(new_image.content_type),
            size_bytes: Set(new_image.size_bytes),
            path: Set(new_image.path),
            created_at: Set(Utc::now()),
        }
        .insert(&txn)
        .await
        .map_err(|e| {
            if let Some(sea_orm::SqlErr::ForeignKeyConstraintViolation(_)) = e.sql_err() {
                DomainError::not_found("PublishedReservation", reservation_id)
            } else {
                db_err(e)
            }
        })?;

        txn.commit().await.map_err(db_err)?;

        Ok((model_to_domain(model), previous.map(model_to_domain)))
    }

    async fn find_by_reservation(
        &self,
        published_reservation_id: i32,
    ) -> DomainResult<Option<ReservationImage>> {
        let model = image::Entity::find()
            .filter(image::Column::PublishedReservationId.eq(published_reservation_id))
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(model_to_domain))
    }

    async fn find_by_reservations(
        &self,
        published_reservation_ids: &[i32],
    ) -> DomainResult<Vec<ReservationImage>> {
        if published_reservation_ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = image::Entity::find()
            .filter(
                image::Column::PublishedReservationId
                    .is_in(published_reservation_ids.iter().copied()),
            )
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(models.into_iter().map(model_to_domain).collect())
    }
}
