//! `ValidatedJson<T>`: `axum::Json<T>` followed by `validator::Validate`.
//!
//! Malformed bodies keep axum's status (400/415/422) with an `ApiResponse`
//! error envelope. Failed validation answers 422 with every field error
//! joined into the message, sorted by field name.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use super::ApiResponse;

/// Request body that has been deserialized and validated.
///
/// ```ignore
/// async fn publish(ValidatedJson(body): ValidatedJson<CreatePublishedReservationRequest>) {
///     // rooms >= 1, people >= 1, price >= 0 already hold here
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

pub enum BodyRejection {
    Malformed(JsonRejection),
    Invalid(ValidationErrors),
}

/// `field: message` for every failed rule, ordered by field.
pub fn describe(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    let parts: Vec<String> = fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(msg) => format!("{}: {}", field, msg),
                None => format!("{}: invalid ({})", field, e.code),
            })
        })
        .collect();

    if parts.is_empty() {
        "Validation failed".to_string()
    } else {
        parts.join("; ")
    }
}

impl IntoResponse for BodyRejection {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            BodyRejection::Malformed(rejection) => (
                rejection.status(),
                format!("Invalid JSON: {}", rejection.body_text()),
            ),
            BodyRejection::Invalid(errors) => {
                (StatusCode::UNPROCESSABLE_ENTITY, describe(&errors))
            }
        };
        (status, Json(ApiResponse::<()>::error(message))).into_response()
    }
}

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = BodyRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(BodyRejection::Malformed)?;
        value.validate().map_err(BodyRejection::Invalid)?;
        Ok(ValidatedJson(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::routing::post;
    use axum::Router;
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Debug, Deserialize, Validate)]
    struct Listing {
        #[validate(length(min = 1, message = "name is required"))]
        name: String,
        #[validate(range(min = 1, message = "rooms must be at least 1"))]
        rooms: i32,
        #[validate(range(min = 0.0))]
        price: f64,
    }

    async fn post_listing(body: Body, content_type: &str) -> (StatusCode, serde_json::Value) {
        let app = Router::new().route(
            "/listings",
            post(|ValidatedJson(l): ValidatedJson<Listing>| async move { l.name }),
        );
        let resp = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/listings")
                    .header("content-type", content_type)
                    .body(body)
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn valid_listing_reaches_handler() {
        let body = serde_json::json!({"name": "Suite", "rooms": 2, "price": 10.0});
        let (status, _) = post_listing(Body::from(body.to_string()), "application/json").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn syntax_error_is_400_envelope() {
        let (status, body) = post_listing(Body::from("{rooms:"), "application/json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert!(body["message"].as_str().unwrap().starts_with("Invalid JSON"));
    }

    #[tokio::test]
    async fn wrong_content_type_keeps_axum_status() {
        let (status, _) = post_listing(Body::from("{}"), "text/plain").await;
        assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }

    #[tokio::test]
    async fn rule_failures_are_sorted_by_field() {
        let body = serde_json::json!({"name": "", "rooms": 0, "price": -1.0});
        let (status, body) = post_listing(Body::from(body.to_string()), "application/json").await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            body["message"],
            "name: name is required; price: invalid (range); rooms: rooms must be at least 1"
        );
    }
}
