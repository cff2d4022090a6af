pub mod hotelier;
pub mod image;
pub mod published_reservation;
pub mod repositories;

// Re-export commonly used types
pub use hotelier::{CreateHotelierDto, Hotelier, HotelierRepository, UpdateHotelierDto};
pub use image::{ImageRepository, NewImage, ReservationImage};
pub use published_reservation::{
    Amenities, CreatePublishedReservationDto, PublishedReservation,
    PublishedReservationRepository,
};
pub use repositories::{DomainResult, RepositoryProvider};

// Re-export DomainError from shared for convenience
pub use crate::shared::errors::DomainError;
