//! Published reservation aggregate
//!
//! A listing a hotelier publishes: rooms, capacity, price and amenities.

pub mod model;
pub mod repository;

mod dto_create;

pub use dto_create::CreatePublishedReservationDto;
pub use model::{Amenities, PublishedReservation};
pub use repository::PublishedReservationRepository;
