//! Create images table
//!
//! At most one image per published reservation.

use sea_orm_migration::prelude::*;

use super::m20240101_000002_create_published_reservations::PublishedReservations;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Images::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Images::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Images::PublishedReservationId)
                            .integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Images::FileName).string().not_null())
                    .col(ColumnDef::new(Images::ContentType).string().not_null())
                    .col(ColumnDef::new(Images::SizeBytes).big_integer().not_null())
                    .col(ColumnDef::new(Images::Path).string().not_null())
                    .col(
                        ColumnDef::new(Images::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_images_published_reservation")
                            .from(Images::Table, Images::PublishedReservationId)
                            .to(PublishedReservations::Table, PublishedReservations::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Images::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Images {
    Table,
    Id,
    PublishedReservationId,
    FileName,
    ContentType,
    SizeBytes,
    Path,
    CreatedAt,
}
