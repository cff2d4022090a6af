//! Hotelier DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::SignupRequest;
use crate::domain::{Hotelier, UpdateHotelierDto};

/// Public view of a hotelier; never carries the password hash
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HotelierDto {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub username: String,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Hotelier> for HotelierDto {
    fn from(h: Hotelier) -> Self {
        Self {
            id: h.id,
            name: h.name,
            email: h.email,
            username: h.username,
            phone: h.phone,
            created_at: h.created_at,
            updated_at: h.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SignupHotelierRequest {
    #[validate(length(min = 1, max = 120, message = "name is required"))]
    pub name: String,
    #[validate(email(message = "invalid email format"))]
    pub email: String,
    #[validate(length(min = 3, max = 50, message = "username must be 3-50 characters"))]
    pub username: String,
    #[validate(length(min = 6, max = 128, message = "password must be 6-128 characters"))]
    pub password: String,
    #[validate(length(max = 30, message = "phone is too long"))]
    pub phone: Option<String>,
}

impl From<SignupHotelierRequest> for SignupRequest {
    fn from(r: SignupHotelierRequest) -> Self {
        Self {
            name: r.name,
            email: r.email,
            username: r.username,
            password: r.password,
            phone: r.phone,
        }
    }
}

/// Partial update; absent fields are left untouched
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateHotelierRequest {
    #[validate(length(min = 1, max = 120, message = "name must not be empty"))]
    pub name: Option<String>,
    #[validate(email(message = "invalid email format"))]
    pub email: Option<String>,
    #[validate(length(min = 3, max = 50, message = "username must be 3-50 characters"))]
    pub username: Option<String>,
    #[validate(length(min = 6, max = 128, message = "password must be 6-128 characters"))]
    pub password: Option<String>,
    #[validate(length(max = 30, message = "phone is too long"))]
    pub phone: Option<String>,
}

impl UpdateHotelierRequest {
    /// Split into the repository DTO and the plain-text password to hash.
    pub fn into_parts(self) -> (UpdateHotelierDto, Option<String>) {
        (
            UpdateHotelierDto {
                name: self.name,
                email: self.email,
                username: self.username,
                password_hash: None,
                phone: self.phone,
            },
            self.password,
        )
    }
}
