/// Attributes for a new hotelier. `password_hash` is already hashed.
#[derive(Debug, Clone)]
pub struct CreateHotelierDto {
    pub name: String,
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub phone: Option<String>,
}
