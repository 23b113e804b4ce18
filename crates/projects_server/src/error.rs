use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::store::StoreError;

/// Errors returned to HTTP clients
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid project ID.")]
    InvalidProjectId,

    #[error("Project not found!")]
    ProjectNotFound,

    #[error("{0}")]
    MalformedBody(String),

    #[error("Failed to encode metrics: {0}")]
    Metrics(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidProjectId | Self::ProjectNotFound | Self::MalformedBody(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::Metrics(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) => Self::ProjectNotFound,
        }
    }
}

/// JSON error body: `{"error": "..."}`
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_error_messages() {
        assert_eq!(ApiError::InvalidProjectId.to_string(), "Invalid project ID.");
        assert_eq!(ApiError::ProjectNotFound.to_string(), "Project not found!");
    }

    #[test]
    fn test_store_error_maps_to_not_found() {
        let err: ApiError = StoreError::NotFound(Uuid::nil()).into();
        assert!(matches!(err, ApiError::ProjectNotFound));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_error_response() {
        let err = ErrorResponse {
            error: "Project not found!".to_string(),
        };

        let json = serde_json::to_string(&err).unwrap();
        assert_eq!(json, r#"{"error":"Project not found!"}"#);
    }
}
