//! Create published_reservations table
//!
//! Listings belong to a hotelier and are removed together with it.

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_hoteliers::Hoteliers;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PublishedReservations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PublishedReservations::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PublishedReservations::HotelierId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(PublishedReservations::Name).string().not_null())
                    .col(ColumnDef::new(PublishedReservations::Rooms).integer().not_null())
                    .col(ColumnDef::new(PublishedReservations::People).integer().not_null())
                    .col(ColumnDef::new(PublishedReservations::Price).double().not_null())
                    .col(
                        ColumnDef::new(PublishedReservations::Wifi)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(PublishedReservations::Breakfast)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(PublishedReservations::AirConditioner)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(PublishedReservations::Parking)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(PublishedReservations::RoomService)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(PublishedReservations::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PublishedReservations::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_published_reservations_hotelier")
                            .from(PublishedReservations::Table, PublishedReservations::HotelierId)
                            .to(Hoteliers::Table, Hoteliers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_published_reservations_hotelier")
                    .table(PublishedReservations::Table)
                    .col(PublishedReservations::HotelierId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PublishedReservations::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum PublishedReservations {
    Table,
    Id,
    HotelierId,
    Name,
    Rooms,
    People,
    Price,
    Wifi,
    Breakfast,
    AirConditioner,
    Parking,
    RoomService,
    CreatedAt,
    UpdatedAt,
}
