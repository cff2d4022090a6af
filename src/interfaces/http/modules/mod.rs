pub mod auth;
pub mod health;
pub mod hoteliers;
pub mod metrics;
pub mod published_reservations;
