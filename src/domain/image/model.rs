use chrono::{DateTime, Utc};

/// Metadata of an uploaded image; the bytes live in the upload directory.
#[derive(Debug, Clone, PartialEq)]
pub struct ReservationImage {
    pub id: i32,
    pub published_reservation_id: i32,
    pub file_name: String,
    pub content_type: String,
    pub size_bytes: i64,
    /// Path relative to the upload directory
    pub path: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewImage {
    pub published_reservation_id: i32,
    pub file_name: String,
    pub content_type: String,
    pub size_bytes: i64,
    pub path: String,
}
