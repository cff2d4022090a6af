//! Database entities module

pub mod hotelier;
pub mod image;
pub mod published_reservation;

pub use hotelier::Entity as Hotelier;
pub use image::Entity as Image;
pub use published_reservation::Entity as PublishedReservation;
