use axum::{extract::State, http::header, response::IntoResponse};
use metrics_exporter_prometheus::PrometheusHandle;


use crate::application::identity::HOTELIERS_CREATED;
use crate::application::listings::{IMAGES_UPLOADED, LISTINGS_PUBLISHED};

/// Per-request series recorded by [`super::http_metrics_middleware`].
pub const HTTP_REQUESTS: &str = "http_requests_total";
pub const HTTP_DURATION: &str = "http_request_duration_seconds";

const PROMETHEUS_TEXT: &str = "text/plain; version=0.0.4; charset=utf-8";

#[derive(Clone)]
pub struct MetricsState {
    pub handle: PrometheusHandle,
}

/// Attach help text to every series. Call once the recorder is installed.
pub fn describe_metrics() {
    metrics::describe_counter!(HOTELIERS_CREATED, "Hotelier accounts created through signup");
    metrics::describe_counter!(LISTINGS_PUBLISHED, "Reservations published by hoteliers");
    metrics::describe_counter!(IMAGES_UPLOADED, "Listing images stored, replacements included");
    metrics::describe_counter!(HTTP_REQUESTS, "HTTP requests by method, route and status");
    metrics::describe_histogram!(
        HTTP_DURATION,
        metrics::Unit::Seconds,
        "HTTP request latency by method and route"
    );
}

/// `GET /metrics`
pub async fn prometheus_metrics(State(state): State<MetricsState>) -> impl IntoResponse {
    ([(header::CONTENT_TYPE, PROMETHEUS_TEXT)], state.handle.render())
}
