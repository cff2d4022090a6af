//! Authentication: login by email or username

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
