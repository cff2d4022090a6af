use async_trait::async_trait;

use super::{NewImage, ReservationImage};
use crate::domain::DomainResult;

#[async_trait]
pub trait ImageRepository: Send + Sync {
    /// Attach an image to a reservation, replacing any previous one.
    /// Returns the stored row and the replaced row, if there was one.
    async fn replace_for_reservation(
        &self,
        image: NewImage,
    ) -> DomainResult<(ReservationImage, Option<ReservationImage>)>;

    async fn find_by_reservation(
        &self,
        published_reservation_id: i32,
    ) -> DomainResult<Option<ReservationImage>>;

    /// Images of every listed reservation, in one query. Reservations
    /// without an image are simply absent from the result.
    async fn find_by_reservations(
        &self,
        published_reservation_ids: &[i32],
    ) -> DomainResult<Vec<ReservationImage>>;
}
