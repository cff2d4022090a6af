//! Publishing a reservation listing: validate, create, upload, navigate
//!
//! The create and upload calls run strictly one after the other. Every
//! failure is turned into a notification; [`PublishOutcome`] reports what
//! happened to the caller.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use super::api::{ApiError, NewPublishedReservation, ReservationApi};
use super::form::{parse_decimal_prefix, parse_int_prefix, FormField, ImageFile, PublishForm};
use super::session::HotelierSession;
use super::ui::{
    Navigator, Notifier, LISTING_ROUTE, MSG_FILL_ALL_FIELDS, MSG_INVALID_NUMBERS,
    MSG_LOGIN_REQUIRED, MSG_PUBLISHED, MSG_SELECT_IMAGE, NAVIGATION_DELAY,
};

/// Reason a form was rejected before any network call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{}", MSG_SELECT_IMAGE)]
    MissingImage,
    #[error("{}", MSG_FILL_ALL_FIELDS)]
    MissingFields,
    #[error("{}", MSG_LOGIN_REQUIRED)]
    NotSignedIn,
    #[error("{}", MSG_INVALID_NUMBERS)]
    InvalidNumbers,
}

#[derive(Debug)]
pub enum PublishOutcome {
    Rejected(ValidationError),
    /// Both calls succeeded; `navigation` fires after the delay and may be aborted.
    Published {
        reservation_id: i32,
        navigation: JoinHandle<()>,
    },
    Failed(ApiError),
}

pub struct PublishWorkflow {
    api: Arc<dyn ReservationApi>,
    session: Arc<dyn HotelierSession>,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
    navigation_delay: Duration,
}

impl PublishWorkflow {
    pub fn new(
        api: Arc<dyn ReservationApi>,
        session: Arc<dyn HotelierSession>,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            api,
            session,
            notifier,
            navigator,
            navigation_delay: NAVIGATION_DELAY,
        }
    }

    pub fn with_navigation_delay(mut self, delay: Duration) -> Self {
        self.navigation_delay = delay;
        self
    }

    /// Checks run in order and stop at the first failure.
    pub fn validate<'a>(
        &self,
        form: &'a PublishForm,
    ) -> Result<(NewPublishedReservation, &'a ImageFile), ValidationError> {
        let image = form.image().ok_or(ValidationError::MissingImage)?;
        if form.first_empty_field().is_some() {
            return Err(ValidationError::MissingFields);
        }
        let hotelier_id = self
            .session
            .hotelier_id()
            .ok_or(ValidationError::NotSignedIn)?;

        let rooms = parse_int_prefix(form.field(FormField::Rooms));
        let people = parse_int_prefix(form.field(FormField::People));
        let price = parse_decimal_prefix(form.field(FormField::Price));
        let (Some(rooms), Some(people), Some(price)) = (rooms, people, price) else {
            return Err(ValidationError::InvalidNumbers);
        };

        let amenities = form.amenities();
        Ok((
            NewPublishedReservation {
                hotelier_id,
                name: form.field(FormField::Name).to_string(),
                rooms,
                people,
                wifi: amenities.wifi,
                breakfast: amenities.breakfast,
                air_conditioner: amenities.air_conditioner,
                parking: amenities.parking,
                room_service: amenities.room_service,
                price,
            },
            image,
        ))
    }

    pub async fn publish(&self, form: &PublishForm) -> PublishOutcome {
        let (reservation, image) = match self.validate(form) {
            Ok(valid) => valid,
            Err(reason) => {
                self.notifier.warning(&reason.to_string());
                return PublishOutcome::Rejected(reason);
            }
        };

        let created = match self.api.create_published_reservation(&reservation).await {
            Ok(created) => created,
            Err(e) => {
                self.notifier.error(&e.to_string());
                return PublishOutcome::Failed(e);
            }
        };

        if let Err(e) = self.api.upload_image(created.id, image).await {
            warn!(
                reservation_id = created.id,
                error = %e,
                "Image upload failed; reservation left without image"
            );
            self.notifier.error(&e.to_string());
            return PublishOutcome::Failed(e);
        }

        info!(reservation_id = created.id, "Reservation published");
        self.notifier.success(MSG_PUBLISHED);

        let navigator = Arc::clone(&self.navigator);
        let delay = self.navigation_delay;
        let navigation = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            navigator.navigate(LISTING_ROUTE);
        });

        PublishOutcome::Published {
            reservation_id: created.id,
            navigation,
        }
    }

    pub fn go_back(&self) {
        self.navigator.back();
    }
}
