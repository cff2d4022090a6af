//! Database migrations module

pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_hoteliers;
mod m20240101_000002_create_published_reservations;
mod m20240101_000003_create_images;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_hoteliers::Migration),
            Box::new(m20240101_000002_create_published_reservations::Migration),
            Box::new(m20240101_000003_create_images::Migration),
        ]
    }
}
