//! Published reservation domain entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Boolean amenity flags attached to a listing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amenities {
    pub wifi: bool,
    pub breakfast: bool,
    pub air_conditioner: bool,
    pub parking: bool,
    pub room_service: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PublishedReservation {
    pub id: i32,
    /// Owning hotelier
    pub hotelier_id: i32,
    pub name: String,
    pub rooms: i32,
    pub people: i32,
    pub price: f64,
    pub amenities: Amenities,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PublishedReservation {
    pub fn is_owned_by(&self, hotelier_id: i32) -> bool {
        self.hotelier_id == hotelier_id
    }
}
