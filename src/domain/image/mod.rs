//! Images attached to published reservations

pub mod model;
pub mod repository;

pub use model::{NewImage, ReservationImage};
pub use repository::ImageRepository;
