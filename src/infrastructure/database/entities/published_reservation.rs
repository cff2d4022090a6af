//! Published reservation entity

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "published_reservations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub hotelier_id: i32,
    pub name: String,
    pub rooms: i32,
    pub people: i32,
    pub price: f64,
    pub wifi: bool,
    pub breakfast: bool,
    pub air_conditioner: bool,
    pub parking: bool,
    pub room_service: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::hotelier::Entity",
        from = "Column::HotelierId",
        to = "super::hotelier::Column::Id"
    )]
    Hotelier,
    #[sea_orm(has_one = "super::image::Entity")]
    Image,
}

impl Related<super::hotelier::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Hotelier.def()
    }
}

impl Related<super::image::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Image.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
