use async_trait::async_trait;

use super::{CreateHotelierDto, Hotelier, UpdateHotelierDto};
use crate::domain::DomainResult;

/// Persistence operations for hoteliers. Implementations only delegate to the store.
#[async_trait]
pub trait HotelierRepository: Send + Sync {
    /// Fails with `Conflict` when the store rejects a duplicate email/username.
    async fn create(&self, dto: CreateHotelierDto) -> DomainResult<Hotelier>;

    async fn find_by_email_or_username(
        &self,
        email: &str,
        username: &str,
    ) -> DomainResult<Option<Hotelier>>;
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Hotelier>>;
    /// Every hotelier, unpaginated.
    async fn list_all(&self) -> DomainResult<Vec<Hotelier>>;

    /// Fails with `NotFound` if no hotelier has this id.
    async fn update(&self, id: i32, dto: UpdateHotelierDto) -> DomainResult<Hotelier>;
    /// Fails with `NotFound` if no hotelier has this id.
    async fn delete(&self, id: i32) -> DomainResult<()>;
}
