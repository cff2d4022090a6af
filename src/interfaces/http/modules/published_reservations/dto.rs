//! Published reservation DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::domain::{Amenities, CreatePublishedReservationDto, PublishedReservation, ReservationImage};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreatePublishedReservationRequest {
    /// Must match the authenticated hotelier when given
    pub hotelier_id: Option<i32>,
    #[validate(length(min = 1, max = 120, message = "name is required"))]
    pub name: String,
    #[validate(range(min = 1, message = "rooms must be at least 1"))]
    pub rooms: i32,
    #[validate(range(min = 1, message = "people must be at least 1"))]
    pub people: i32,
    #[validate(range(min = 0.0, message = "price must not be negative"))]
    pub price: f64,
    #[serde(default)]
    pub wifi: bool,
    #[serde(default)]
    pub breakfast: bool,
    #[serde(default)]
    pub air_conditioner: bool,
    #[serde(default)]
    pub parking: bool,
    #[serde(default)]
    pub room_service: bool,
}

impl CreatePublishedReservationRequest {
    pub fn into_dto(self, hotelier_id: i32) -> CreatePublishedReservationDto {
        CreatePublishedReservationDto {
            hotelier_id,
            name: self.name,
            rooms: self.rooms,
            people: self.people,
            price: self.price,
            amenities: Amenities {
                wifi: self.wifi,
                breakfast: self.breakfast,
                air_conditioner: self.air_conditioner,
                parking: self.parking,
                room_service: self.room_service,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ImageDto {
    pub file_name: String,
    pub content_type: String,
    pub size_bytes: i64,
    /// Where the bytes can be fetched
    pub url: String,
}

impl From<ReservationImage> for ImageDto {
    fn from(img: ReservationImage) -> Self {
        Self {
            url: image_url(img.published_reservation_id),
            file_name: img.file_name,
            content_type: img.content_type,
            size_bytes: img.size_bytes,
        }
    }
}

pub fn image_url(reservation_id: i32) -> String {
    format!("/api/v1/published-reservations/{}/image", reservation_id)
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PublishedReservationDto {
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
    pub image: Option<ImageDto>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PublishedReservationDto {
    pub fn new(r: PublishedReservation, image: Option<ReservationImage>) -> Self {
        Self {
            id: r.id,
            hotelier_id: r.hotelier_id,
            name: r.name,
            rooms: r.rooms,
            people: r.people,
            price: r.price,
            wifi: r.amenities.wifi,
            breakfast: r.amenities.breakfast,
            air_conditioner: r.amenities.air_conditioner,
            parking: r.amenities.parking,
            room_service: r.amenities.room_service,
            image: image.map(ImageDto::from),
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListPublishedReservationsParams {
    /// Only listings of this hotelier
    pub hotelier_id: Option<i32>,
}

/// Multipart body of the image upload, documented for OpenAPI only
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct ImageUploadForm {
    #[schema(value_type = String, format = Binary)]
    pub image: Vec<u8>,
}
