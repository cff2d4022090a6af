//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories + unified RepositoryProvider.

pub mod hotelier_repository;
pub mod image_repository;
pub mod published_reservation_repository;
pub mod repository_provider;

pub use repository_provider::SeaOrmRepositoryProvider;
