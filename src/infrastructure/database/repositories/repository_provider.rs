//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::hotelier::HotelierRepository;
use crate::domain::image::ImageRepository;
use crate::domain::published_reservation::PublishedReservationRepository;
use crate::domain::repositories::RepositoryProvider;

use super::hotelier_repository::SeaOrmHotelierRepository;
use super::image_repository::SeaOrmImageRepository;
use super::published_reservation_repository::SeaOrmPublishedReservationRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let hotelier = repos.hoteliers().find_by_id(1).await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    hoteliers: SeaOrmHotelierRepository,
    published_reservations: SeaOrmPublishedReservationRepository,
    images: SeaOrmImageRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            hoteliers: SeaOrmHotelierRepository::new(db.clone()),
            published_reservations: SeaOrmPublishedReservationRepository::new(db.clone()),
            images: SeaOrmImageRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn hoteliers(&self) -> &dyn HotelierRepository {
        &self.hoteliers
    }

    fn published_reservations(&self) -> &dyn PublishedReservationRepository {
        &self.published_reservations
    }

    fn images(&self) -> &dyn ImageRepository {
        &self.images
    }
}
