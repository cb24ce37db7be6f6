//! Response envelope and error mapping shared by every endpoint.
//!
//! All responses, successful or not, use the same JSON shape:
//! - `status`: `"success"` or `"error"`
//! - `message`: Human-readable message
//! - `data`: Endpoint payload, `null` on error
//!
//! # Error Handling Flow
//! 1. Service layer returns domain-specific `ServiceError`
//! 2. `service_error_to_http` converts it to an `ApiError` with a status code
//! 3. `ApiError` renders as an error envelope

use crate::errors::ServiceError;
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

/// Outcome marker carried by every envelope
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Error,
}

/// Standard API response wrapper for all endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the request succeeded
    pub status: ResponseStatus,
    /// Human-readable message
    pub message: String,
    /// Response data, `null` on error
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Create a successful response
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Success,
            message: message.into(),
            data: Some(data),
        }
    }

    /// Create an error response
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Error,
            message: message.into(),
            data: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == ResponseStatus::Success
    }
}

/// Error returned by handlers and middleware, rendered as an error envelope.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, message)
    }

    pub fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ApiResponse::<()>::error(self.message))).into_response()
    }
}

impl From<ServiceError> for ApiError {
    fn from(error: ServiceError) -> Self {
        service_error_to_http(error)
    }
}

/// Unreadable, untyped or mistyped JSON bodies are all a bad request.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::bad_request(rejection.body_text())
    }
}

/// Converts ServiceError to appropriate HTTP status and client-safe message
pub fn service_error_to_http(error: ServiceError) -> ApiError {
    match error {
        ServiceError::Validation { message } => ApiError::bad_request(message),
        ServiceError::NotFound { entity, identifier } => ApiError::new(
            StatusCode::NOT_FOUND,
            format!("{} '{}' not found", entity, identifier),
        ),
        ServiceError::AlreadyExists { entity, identifier } => ApiError::new(
            StatusCode::CONFLICT,
            format!("{} '{}' already exists", entity, identifier),
        ),
        ServiceError::Unauthorized { message } => ApiError::unauthorized(message),
        ServiceError::PermissionDenied { message } => ApiError::forbidden(message),
        ServiceError::Database { source } => {
            tracing::error!("Database error: {}", source);
            ApiError::internal()
        }
        ServiceError::Internal { message } => {
            tracing::error!("Internal error: {}", message);
            ApiError::internal()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_envelope_shape() {
        let response = ApiResponse::success(json!({"email": "a@b.com"}), "ok");
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(
            value,
            json!({"status": "success", "message": "ok", "data": {"email": "a@b.com"}})
        );
    }

    #[test]
    fn test_error_envelope_has_null_data() {
        let value = serde_json::to_value(ApiResponse::<()>::error("nope")).unwrap();
        assert_eq!(value, json!({"status": "error", "message": "nope", "data": null}));
    }

    #[test]
    fn test_service_error_mapping() {
        let cases = [
            (ServiceError::validation("bad"), StatusCode::BAD_REQUEST),
            (ServiceError::not_found("User", "1"), StatusCode::NOT_FOUND),
            (ServiceError::already_exists("User", "a"), StatusCode::CONFLICT),
            (ServiceError::unauthorized("no"), StatusCode::UNAUTHORIZED),
            (ServiceError::permission_denied("no"), StatusCode::FORBIDDEN),
            (ServiceError::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (error, status) in cases {
            assert_eq!(service_error_to_http(error).status, status);
        }
    }

    #[test]
    fn test_json_rejection_is_a_bad_request() {
        let rejection = Json::<serde_json::Value>::from_bytes(b"{not json").unwrap_err();
        let error = ApiError::from(rejection);

        assert_eq!(error.status, StatusCode::BAD_REQUEST);
        assert!(!error.message.is_empty());
    }

    #[test]
    fn test_internal_details_are_hidden() {
        let error = service_error_to_http(ServiceError::Database {
            source: anyhow::anyhow!("disk I/O error at /var/db"),
        });
        assert_eq!(error.message, "Internal server error");
    }
}
