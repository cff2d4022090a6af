//! Create hoteliers table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Hoteliers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Hoteliers::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Hoteliers::Name).string().not_null())
                    .col(
                        ColumnDef::new(Hoteliers::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Hoteliers::Username)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Hoteliers::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Hoteliers::Phone).string())
                    .col(
                        ColumnDef::new(Hoteliers::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Hoteliers::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Hoteliers::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Hoteliers {
    Table,
    Id,
    Name,
    Email,
    Username,
    PasswordHash,
    Phone,
    CreatedAt,
    UpdatedAt,
}
