//! Reservation listings published by hoteliers, and their image

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
