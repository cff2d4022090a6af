//! Hotelier accounts: signup, profile and self-service management

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
