//! Hotelier domain entity

use chrono::{DateTime, Utc};

/// Operator of the hotel that owns reservation listings
#[derive(Debug, Clone, PartialEq)]
pub struct Hotelier {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
