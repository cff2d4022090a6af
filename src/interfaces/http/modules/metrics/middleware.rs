use std::time::Instant;

use axum::{extract::MatchedPath, extract::Request, middleware::Next, response::Response};

use super::handlers::{HTTP_DURATION, HTTP_REQUESTS};

/// Label value for the request: the route template (`/api/v1/published-reservations/{id}/image`)
/// rather than the concrete path, so listing ids do not become label values.
fn route_label(request: &Request) -> String {
    request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| "unmatched".to_owned())
}

pub async fn http_metrics_middleware(request: Request, next: Next) -> Response {
    let method = request.method().as_str().to_owned();
    let route = route_label(&request);
    let started = Instant::now();

    let response = next.run(request).await;

    let status = response.status().as_u16().to_string();
    metrics::histogram!(HTTP_DURATION, "method" => method.clone(), "route" => route.clone())
        .record(started.elapsed().as_secs_f64());
    metrics::counter!(HTTP_REQUESTS, "method" => method, "route" => route, "status" => status)
        .increment(1);

    response
}
