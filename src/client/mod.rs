//! Client for publishing reservation listings
//!
//! [`PublishWorkflow`] drives a [`PublishForm`] through validation, the
//! create call and the image upload, then schedules navigation to the
//! listing page. Remote calls, the session, notifications and navigation
//! are injected through traits.

pub mod api;
pub mod form;
pub mod session;
pub mod ui;
pub mod workflow;

pub use api::{ApiError, CreatedReservation, HttpReservationApi, LoginGrant, NewPublishedReservation, ReservationApi};
pub use form::{accepts_key, clamp_discount, Amenity, FieldKind, FormField, ImageFile, PublishForm};
pub use session::{HotelierSession, StaticSession};
pub use ui::{Navigator, Notifier, LISTING_ROUTE, NAVIGATION_DELAY};
pub use workflow::{PublishOutcome, PublishWorkflow, ValidationError};
