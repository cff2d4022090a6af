//! # Hotel Reservations
//!
//! Backend and client for hoteliers publishing reservation listings.
//!
//! ## Architecture
//!
//! - **domain**: entities, typed DTOs and repository traits
//! - **application**: hotelier and listing use cases
//! - **infrastructure**: SeaORM persistence, image storage, JWT and password hashing
//! - **interfaces**: REST API with Swagger documentation
//! - **client**: the listing-publishing workflow and its HTTP client
//! - **server**: startup, tracing and graceful shutdown

pub mod application;
pub mod client;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};

pub use infrastructure::{init_database, DatabaseConfig};
pub use infrastructure::database::repositories::SeaOrmRepositoryProvider;

pub use interfaces::create_api_router;
pub use server::{init_tracing, ServerHandle, ServerOptions};
