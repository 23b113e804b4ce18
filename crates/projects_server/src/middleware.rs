//! Request pipeline stages
//!
//! Each stage either hands the request to `next` or answers it directly.
//! The router composes them: [`log_requests`] wraps every route,
//! [`validate_project_id`] wraps only the `/projects/:id` routes.

use axum::extract::{Path, Request};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tracing::{info, warn};

use crate::error::ApiError;
use crate::id;
use crate::metrics::METRICS;

/// Build the `[METHOD] /path?query` label for a request
pub fn request_label(request: &Request) -> String {
    let path = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");

    format!("[{}] {}", request.method().as_str().to_uppercase(), path)
}

/// Log every request, then continue unconditionally
pub async fn log_requests(request: Request, next: Next) -> Response {
    let label = request_label(&request);

    METRICS
        .http_requests
        .with_label_values(&[request.method().as_str()])
        .inc();

    info!(method = %request.method(), uri = %request.uri(), "{}", label);

    next.run(request).await
}

/// Reject requests whose `:id` segment is not a well-formed identifier
pub async fn validate_project_id(
    Path(project_id): Path<String>,
    request: Request,
    next: Next,
) -> Response {
    if !id::is_valid(&project_id) {
        warn!(project_id = %project_id, "Rejected malformed project ID");
        return ApiError::InvalidProjectId.into_response();
    }

    next.run(request).await
}
