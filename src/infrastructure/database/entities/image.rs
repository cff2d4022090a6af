//! Reservation image entity (metadata only, bytes are on disk)

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "images")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub published_reservation_id: i32,
    pub file_name: String,
    pub content_type: String,
    pub size_bytes: i64,
    pub path: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::published_reservation::Entity",
        from = "Column::PublishedReservationId",
        to = "super::published_reservation::Column::Id"
    )]
    PublishedReservation,
}

impl Related<super::published_reservation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PublishedReservation.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
