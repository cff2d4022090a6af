//! `/health`: uptime and a row count over the listings table

pub mod handlers;

pub use handlers::*;
