//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::application::{HotelierService, ListingService};
use crate::infrastructure::crypto::jwt::JwtConfig;
use crate::interfaces::http::common::ApiResponse;
use crate::interfaces::http::middleware::{auth_middleware, AuthState};
use crate::interfaces::http::modules::{
    auth, health, hoteliers, metrics as metrics_module, published_reservations,
};

/// Room for multipart framing on top of the raw image limit
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT obtained from /api/v1/auth/login"))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::login,
        hoteliers::signup,
        hoteliers::list_hoteliers,
        hoteliers::get_current_hotelier,
        hoteliers::get_hotelier,
        hoteliers::update_hotelier,
        hoteliers::delete_hotelier,
        published_reservations::create_published_reservation,
        published_reservations::list_published_reservations,
        published_reservations::get_published_reservation,
        published_reservations::upload_image,
        published_reservations::get_image,
    ),
    components(
        schemas(
            ApiResponse<String>,
            health::HealthResponse,
            health::DatabaseHealth,
            health::ServiceStatus,
            auth::LoginRequest,
            auth::LoginResponse,
            hoteliers::HotelierDto,
            hoteliers::SignupHotelierRequest,
            hoteliers::UpdateHotelierRequest,
            published_reservations::CreatePublishedReservationRequest,
            published_reservations::PublishedReservationDto,
            published_reservations::ImageDto,
            published_reservations::ImageUploadForm,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Server health check"),
        (name = "Authentication", description = "Hotelier login (JWT)"),
        (name = "Hoteliers", description = "Hotelier signup and account management"),
        (name = "Published Reservations", description = "Reservation listings and their image"),
    ),
    info(
        title = "Hotel Reservations API",
        version = "1.0.0",
        description = "REST API for hoteliers publishing reservation listings",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(
    db: DatabaseConnection,
    hotelier_service: Arc<HotelierService>,
    listing_service: Arc<ListingService>,
    jwt_config: JwtConfig,
    prometheus_handle: PrometheusHandle,
    max_image_bytes: usize,
) -> Router {
    let middleware_state = AuthState { jwt_config };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Auth routes (public)
    let auth_routes = Router::new()
        .route("/login", post(auth::login))
        .with_state(auth::AuthHandlerState {
            service: hotelier_service.clone(),
        });

    let hotelier_state = hoteliers::HotelierHandlerState {
        service: hotelier_service,
    };

    // Signup (public)
    let signup_routes = Router::new()
        .route("/", post(hoteliers::signup))
        .with_state(hotelier_state.clone());

    // Hotelier routes (protected)
    let hotelier_routes = Router::new()
        .route("/", get(hoteliers::list_hoteliers))
        .route("/me", get(hoteliers::get_current_hotelier))
        .route(
            "/{id}",
            get(hoteliers::get_hotelier)
                .put(hoteliers::update_hotelier)
                .delete(hoteliers::delete_hotelier),
        )
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            auth_middleware,
        ))
        .with_state(hotelier_state);

    let listing_state = published_reservations::ListingHandlerState {
        service: listing_service,
    };

    // Image download (public, so it can back an <img> tag)
    let image_routes = Router::new()
        .route("/{id}/image", get(published_reservations::get_image))
        .with_state(listing_state.clone());

    // Listing routes (protected)
    let listing_routes = Router::new()
        .route(
            "/",
            get(published_reservations::list_published_reservations)
                .post(published_reservations::create_published_reservation),
        )
        .route(
            "/{id}",
            get(published_reservations::get_published_reservation),
        )
        .route(
            "/{id}/image",
            post(published_reservations::upload_image)
                .layer(DefaultBodyLimit::max(max_image_bytes + MULTIPART_OVERHEAD)),
        )
        .layer(middleware::from_fn_with_state(
            middleware_state,
            auth_middleware,
        ))
        .with_state(listing_state);

    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .with_state(health::HealthState {
            db,
            started_at: Arc::new(Instant::now()),
        });

    let metrics_routes = Router::new()
        .route("/metrics", get(metrics_module::prometheus_metrics))
        .with_state(metrics_module::MetricsState {
            handle: prometheus_handle,
        });

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    Router::new()
        .merge(swagger_routes)
        .merge(health_routes)
        .merge(metrics_routes)
        .nest("/api/v1/auth", auth_routes)
        .nest("/api/v1/hoteliers", signup_routes)
        .nest("/api/v1/hoteliers", hotelier_routes)
        .nest("/api/v1/published-reservations", image_routes)
        .nest("/api/v1/published-reservations", listing_routes)
        .layer(middleware::from_fn(metrics_module::http_metrics_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
