//! Hotelier API handlers
//!
//! Signup is public; everything else requires a bearer token, and
//! mutations are only allowed on the caller's own account.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};

use super::dto::{HotelierDto, SignupHotelierRequest, UpdateHotelierRequest};
use crate::application::HotelierService;
use crate::interfaces::http::common::{api_error, domain_error, ApiError, ApiResponse, ValidatedJson};
use crate::interfaces::http::middleware::AuthenticatedHotelier;

#[derive(Clone)]
pub struct HotelierHandlerState {
    pub service: Arc<HotelierService>,
}

fn ensure_self(auth: &AuthenticatedHotelier, id: i32) -> Result<(), ApiError> {
    if auth.hotelier_id == id {
        Ok(())
    } else {
        Err(api_error(
            StatusCode::FORBIDDEN,
            "You can only modify your own account",
        ))
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/hoteliers",
    tag = "Hoteliers",
    request_body = SignupHotelierRequest,
    responses(
        (status = 201, description = "Hotelier registered", body = ApiResponse<HotelierDto>),
        (status = 409, description = "Email or username already in use"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn signup(
    State(state): State<HotelierHandlerState>,
    ValidatedJson(request): ValidatedJson<SignupHotelierRequest>,
) -> Result<(StatusCode, Json<ApiResponse<HotelierDto>>), ApiError> {
    let hotelier = state
        .service
        .signup(request.into())
        .await
        .map_err(domain_error)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(HotelierDto::from(hotelier))),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/hoteliers",
    tag = "Hoteliers",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All hoteliers", body = ApiResponse<Vec<HotelierDto>>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_hoteliers(
    State(state): State<HotelierHandlerState>,
) -> Result<Json<ApiResponse<Vec<HotelierDto>>>, ApiError> {
    let hoteliers = state.service.list_all().await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(
        hoteliers.into_iter().map(HotelierDto::from).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/hoteliers/me",
    tag = "Hoteliers",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Authenticated hotelier", body = ApiResponse<HotelierDto>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn get_current_hotelier(
    State(state): State<HotelierHandlerState>,
    Extension(auth): Extension<AuthenticatedHotelier>,
) -> Result<Json<ApiResponse<HotelierDto>>, ApiError> {
    let hotelier = state
        .service
        .get(auth.hotelier_id)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(HotelierDto::from(hotelier))))
}

#[utoipa::path(
    get,
    path = "/api/v1/hoteliers/{id}",
    tag = "Hoteliers",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Hotelier ID")),
    responses(
        (status = 200, description = "Hotelier details", body = ApiResponse<HotelierDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_hotelier(
    State(state): State<HotelierHandlerState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<HotelierDto>>, ApiError> {
    let hotelier = state.service.get(id).await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(HotelierDto::from(hotelier))))
}

#[utoipa::path(
    put,
    path = "/api/v1/hoteliers/{id}",
    tag = "Hoteliers",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Hotelier ID")),
    request_body = UpdateHotelierRequest,
    responses(
        (status = 200, description = "Hotelier updated", body = ApiResponse<HotelierDto>),
        (status = 403, description = "Not your account"),
        (status = 404, description = "Not found"),
        (status = 409, description = "Email or username already in use")
    )
)]
pub async fn update_hotelier(
    State(state): State<HotelierHandlerState>,
    Extension(auth): Extension<AuthenticatedHotelier>,
    Path(id): Path<i32>,
    ValidatedJson(request): ValidatedJson<UpdateHotelierRequest>,
) -> Result<Json<ApiResponse<HotelierDto>>, ApiError> {
    ensure_self(&auth, id)?;

    let (dto, password) = request.into_parts();
    let hotelier = state
        .service
        .update(id, dto, password)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(HotelierDto::from(hotelier))))
}

#[utoipa::path(
    delete,
    path = "/api/v1/hoteliers/{id}",
    tag = "Hoteliers",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Hotelier ID")),
    responses(
        (status = 204, description = "Hotelier and their listings deleted"),
        (status = 403, description = "Not your account"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_hotelier(
    State(state): State<HotelierHandlerState>,
    Extension(auth): Extension<AuthenticatedHotelier>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    ensure_self(&auth, id)?;
    state.service.delete(id).await.map_err(domain_error)?;
    Ok(StatusCode::NO_CONTENT)
}
