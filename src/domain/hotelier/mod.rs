//! Hotelier aggregate
//!
//! Contains the Hotelier entity, DTOs, and repository interface.

pub mod model;
pub mod repository;

mod dto_create;
mod dto_update;

pub use model::Hotelier;

pub use dto_create::CreateHotelierDto;
pub use dto_update::UpdateHotelierDto;

pub use repository::HotelierRepository;
