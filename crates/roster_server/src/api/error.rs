//! Request-level failures and their HTTP rendering.
//!
//! # Invariants
//! - Validation failures are 400 with a fixed plain-text body.
//! - Oversized Create bodies are 413 with a fixed plain-text body.
//! - Storage and internal failures are 500 with `Error: <message>`.
//! - 405 carries no body.

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use log::Level;
use roster_core::{PayloadError, RepoError};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const MISSING_FIELDS_BODY: &str = "Missing required fields";
pub const MALFORMED_PAYLOAD_BODY: &str = "Malformed payload";
pub const MISSING_ID_BODY: &str = "Missing id";
pub const PAYLOAD_TOO_LARGE_BODY: &str = "Payload too large";

const ALLOWED_METHODS: &str = "GET, POST, DELETE";

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug)]
pub enum ApiError {
    MethodNotAllowed,
    MissingFields,
    MalformedPayload(PayloadError),
    MissingId,
    PayloadTooLarge,
    /// Create hit an existing register number.
    Conflict(String),
    Storage(RepoError),
    /// Body read, encoding or worker failures.
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::MissingFields | Self::MalformedPayload(_) | Self::MissingId => {
                StatusCode::BAD_REQUEST
            }
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Storage(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Whether this failure is a server-side fault rather than a client error.
    pub fn is_fault(&self) -> bool {
        self.status().is_server_error()
    }

    /// Level the dispatcher logs this failure at; `None` means not logged.
    pub fn log_level(&self) -> Option<Level> {
        match self {
            Self::MethodNotAllowed => None,
            Self::Conflict(_) => Some(Level::Warn),
            other if other.is_fault() => Some(Level::Error),
            _ => Some(Level::Info),
        }
    }

    /// Stable name used in log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MethodNotAllowed => "method_not_allowed",
            Self::MissingFields => "missing_fields",
            Self::MalformedPayload(_) => "malformed_payload",
            Self::MissingId => "missing_id",
            Self::PayloadTooLarge => "payload_too_large",
            Self::Conflict(_) => "duplicate_register_number",
            Self::Storage(_) => "storage_failed",
            Self::Internal(_) => "internal",
        }
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MethodNotAllowed => write!(f, "method not allowed"),
            Self::MissingFields => f.write_str(MISSING_FIELDS_BODY),
            Self::MalformedPayload(err) => write!(f, "{err}"),
            Self::MissingId => f.write_str(MISSING_ID_BODY),
            Self::PayloadTooLarge => f.write_str(PAYLOAD_TOO_LARGE_BODY),
            Self::Conflict(id) => write!(f, "student {id} already exists"),
            Self::Storage(err) => write!(f, "{err}"),
            Self::Internal(message) => f.write_str(message),
        }
    }
}

impl Error for ApiError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::MalformedPayload(err) => Some(err),
            Self::Storage(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ApiError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Duplicate(id) => Self::Conflict(id),
            RepoError::Validation(_) => Self::MissingFields,
            other => Self::Storage(other),
        }
    }
}

impl From<PayloadError> for ApiError {
    fn from(value: PayloadError) -> Self {
        match value {
            PayloadError::Encode(err) => Self::Internal(format!("failed to encode students: {err}")),
            other => Self::MalformedPayload(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            Self::MethodNotAllowed => {
                let mut response = status.into_response();
                response
                    .headers_mut()
                    .insert(header::ALLOW, HeaderValue::from_static(ALLOWED_METHODS));
                response
            }
            Self::MissingFields => (status, MISSING_FIELDS_BODY).into_response(),
            Self::MalformedPayload(_) => (status, MALFORMED_PAYLOAD_BODY).into_response(),
            Self::MissingId => (status, MISSING_ID_BODY).into_response(),
            Self::PayloadTooLarge => (status, PAYLOAD_TOO_LARGE_BODY).into_response(),
            other => (status, format!("Error: {other}")).into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ApiError;
    use axum::http::StatusCode;
    use log::Level;
    use roster_core::RepoError;

    #[test]
    fn duplicate_maps_to_conflict() {
        let err = ApiError::from(RepoError::Duplicate("R1".to_string()));
        assert_eq!(err.status(), StatusCode::CONFLICT);
        assert_eq!(err.to_string(), "student R1 already exists");
        assert!(!err.is_fault());
    }

    #[test]
    fn internal_failures_are_faults() {
        let err = ApiError::Internal("worker panicked".to_string());
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.is_fault());
        assert_eq!(err.code(), "internal");
    }

    #[test]
    fn log_level_follows_failure_kind() {
        assert_eq!(ApiError::MethodNotAllowed.log_level(), None);
        assert_eq!(ApiError::MissingId.log_level(), Some(Level::Info));
        assert_eq!(ApiError::PayloadTooLarge.log_level(), Some(Level::Info));
        assert_eq!(
            ApiError::Conflict("R1".to_string()).log_level(),
            Some(Level::Warn)
        );
        assert_eq!(
            ApiError::Internal("disk gone".to_string()).log_level(),
            Some(Level::Error)
        );
    }

    #[test]
    fn oversized_body_is_a_client_error() {
        let err = ApiError::PayloadTooLarge;
        assert_eq!(err.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert!(!err.is_fault());
        assert_eq!(err.code(), "payload_too_large");
    }
}
