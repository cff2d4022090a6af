use async_trait::async_trait;

use super::{CreatePublishedReservationDto, PublishedReservation};
use crate::domain::DomainResult;

#[async_trait]
pub trait PublishedReservationRepository: Send + Sync {
    async fn create(&self, dto: CreatePublishedReservationDto)
        -> DomainResult<PublishedReservation>;
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<PublishedReservation>>;
    async fn list_by_hotelier(&self, hotelier_id: i32) -> DomainResult<Vec<PublishedReservation>>;
    async fn list_all(&self) -> DomainResult<Vec<PublishedReservation>>;
    async fn delete(&self, id: i32) -> DomainResult<()>;
}
