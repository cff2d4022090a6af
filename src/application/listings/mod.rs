//! Published reservations and their images

pub mod service;

pub use service::{ImageUpload, ListingService, IMAGES_UPLOADED, LISTINGS_PUBLISHED};
