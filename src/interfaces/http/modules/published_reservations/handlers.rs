//! Published reservation API handlers

use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Extension, Json,
};
use tracing::debug;

use super::dto::{
    CreatePublishedReservationRequest, ImageDto, ImageUploadForm,
    ListPublishedReservationsParams, PublishedReservationDto,
};
use crate::application::{ImageUpload, ListingService};
use crate::interfaces::http::common::{api_error, domain_error, ApiError, ApiResponse, ValidatedJson};
use crate::interfaces::http::middleware::AuthenticatedHotelier;

/// Multipart field carrying the image
pub const IMAGE_FIELD: &str = "image";

#[derive(Clone)]
pub struct ListingHandlerState {
    pub service: Arc<ListingService>,
}

async fn with_image(
    service: &ListingService,
    reservation: crate::domain::PublishedReservation,
) -> Result<PublishedReservationDto, ApiError> {
    let image = service
        .image_for(reservation.id)
        .await
        .map_err(domain_error)?;
    Ok(PublishedReservationDto::new(reservation, image))
}

#[utoipa::path(
    post,
    path = "/api/v1/published-reservations",
    tag = "Published Reservations",
    security(("bearer_auth" = [])),
    request_body = CreatePublishedReservationRequest,
    responses(
        (status = 201, description = "Listing published", body = ApiResponse<PublishedReservationDto>),
        (status = 403, description = "Publishing for another hotelier"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn create_published_reservation(
    State(state): State<ListingHandlerState>,
    Extension(auth): Extension<AuthenticatedHotelier>,
    ValidatedJson(request): ValidatedJson<CreatePublishedReservationRequest>,
) -> Result<(StatusCode, Json<ApiResponse<PublishedReservationDto>>), ApiError> {
    if let Some(hotelier_id) = request.hotelier_id {
        if hotelier_id != auth.hotelier_id {
            return Err(api_error(
                StatusCode::FORBIDDEN,
                "Cannot publish a reservation for another hotelier",
            ));
        }
    }

    let reservation = state
        .service
        .publish(request.into_dto(auth.hotelier_id))
        .await
        .map_err(domain_error)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(PublishedReservationDto::new(
            reservation,
            None,
        ))),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/published-reservations",
    tag = "Published Reservations",
    security(("bearer_auth" = [])),
    params(ListPublishedReservationsParams),
    responses(
        (status = 200, description = "Listings, newest first", body = ApiResponse<Vec<PublishedReservationDto>>)
    )
)]
pub async fn list_published_reservations(
    State(state): State<ListingHandlerState>,
    Query(params): Query<ListPublishedReservationsParams>,
) -> Result<Json<ApiResponse<Vec<PublishedReservationDto>>>, ApiError> {
    let reservations = state
        .service
        .list(params.hotelier_id)
        .await
        .map_err(domain_error)?;

    let ids: Vec<i32> = reservations.iter().map(|r| r.id).collect();
    let mut images = state.service.images_for(&ids).await.map_err(domain_error)?;

    let items = reservations
        .into_iter()
        .map(|r| {
            let image = images.remove(&r.id);
            PublishedReservationDto::new(r, image)
        })
        .collect();
    Ok(Json(ApiResponse::success(items)))
}

#[utoipa::path(
    get,
    path = "/api/v1/published-reservations/{id}",
    tag = "Published Reservations",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Published reservation ID")),
    responses(
        (status = 200, description = "Listing details", body = ApiResponse<PublishedReservationDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_published_reservation(
    State(state): State<ListingHandlerState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<PublishedReservationDto>>, ApiError> {
    let reservation = state.service.get(id).await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(
        with_image(&state.service, reservation).await?,
    )))
}

#[utoipa::path(
    post,
    path = "/api/v1/published-reservations/{id}/image",
    tag = "Published Reservations",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Published reservation ID")),
    request_body(content = ImageUploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Image stored, replacing any previous one", body = ApiResponse<ImageDto>),
        (status = 400, description = "Missing, empty, oversized or non-image file"),
        (status = 403, description = "Listing belongs to another hotelier"),
        (status = 404, description = "Listing not found")
    )
)]
pub async fn upload_image(
    State(state): State<ListingHandlerState>,
    Extension(auth): Extension<AuthenticatedHotelier>,
    Path(id): Path<i32>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<ImageDto>>), ApiError> {
    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| api_error(e.status(), e.body_text()))?
    {
        if field.name() != Some(IMAGE_FIELD) {
            debug!(field = ?field.name(), "Skipping unexpected multipart field");
            continue;
        }
        let file_name = field.file_name().unwrap_or("image").to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| api_error(e.status(), e.body_text()))?;

        upload = Some(ImageUpload {
            file_name,
            content_type,
            bytes: bytes.to_vec(),
        });
        break;
    }

    let Some(upload) = upload else {
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            format!("Missing multipart field '{}'", IMAGE_FIELD),
        ));
    };

    let image = state
        .service
        .attach_image(auth.hotelier_id, id, upload)
        .await
        .map_err(domain_error)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(ImageDto::from(image))),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/published-reservations/{id}/image",
    tag = "Published Reservations",
    params(("id" = i32, Path, description = "Published reservation ID")),
    responses(
        (status = 200, description = "Raw image bytes"),
        (status = 404, description = "Listing has no image")
    )
)]
pub async fn get_image(
    State(state): State<ListingHandlerState>,
    Path(id): Path<i32>,
) -> Result<Response, ApiError> {
    let (image, bytes) = state.service.read_image(id).await.map_err(domain_error)?;
    Ok(([(header::CONTENT_TYPE, image.content_type)], bytes).into_response())
}
