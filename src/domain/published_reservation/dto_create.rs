use super::Amenities;

#[derive(Debug, Clone)]
pub struct CreatePublishedReservationDto {
    pub hotelier_id: i32,
    pub name: String,
    pub rooms: i32,
    pub people: i32,
    pub price: f64,
    pub amenities: Amenities,
}
