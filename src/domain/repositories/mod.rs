//! Repository traits for the domain layer
//!
//! - `RepositoryProvider`: unified access to all per-aggregate repositories
//! - `DomainResult`: standard result type for domain operations

use super::hotelier::HotelierRepository;
use super::image::ImageRepository;
use super::published_reservation::PublishedReservationRepository;

pub use crate::shared::errors::DomainResult;

/// Provides access to all domain repositories.
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let hotelier = repos.hoteliers().find_by_id(1).await?;
///     let listings = repos.published_reservations().list_by_hotelier(1).await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn hoteliers(&self) -> &dyn HotelierRepository;
    fn published_reservations(&self) -> &dyn PublishedReservationRepository;
    fn images(&self) -> &dyn ImageRepository;
}
