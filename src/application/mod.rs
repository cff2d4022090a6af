//! Application layer: use cases over the domain repositories

pub mod identity;
pub mod listings;

pub use identity::{AuthResult, HotelierService, SignupRequest};
pub use listings::{ImageUpload, ListingService};
