//! Source of the signed-in hotelier's identity

/// Who is signed in, if anyone
pub trait HotelierSession: Send + Sync {
    fn hotelier_id(&self) -> Option<i32>;
}

/// Session fixed at construction, e.g. right after a login
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StaticSession {
    hotelier_id: Option<i32>,
}

impl StaticSession {
    pub fn signed_in(hotelier_id: i32) -> Self {
        Self {
            hotelier_id: Some(hotelier_id),
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }
}

impl HotelierSession for StaticSession {
    fn hotelier_id(&self) -> Option<i32> {
        self.hotelier_id
    }
}
