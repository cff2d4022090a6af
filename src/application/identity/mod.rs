//! Hotelier signup, authentication and profile management

pub mod service;

pub use service::{AuthResult, HotelierService, SignupRequest, HOTELIERS_CREATED};
