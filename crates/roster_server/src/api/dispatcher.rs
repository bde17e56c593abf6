//! Method dispatch for `/api/students`.
//!
//! The only place where operation failures are turned into responses: faults
//! are logged once here at `error`, conflicts at `warn`, other client errors
//! at `info`.

use super::error::ApiError;
use super::students::{create_student, delete_student, list_students};
use super::AppState;
use axum::extract::{Request, State};
use axum::response::{IntoResponse, Response};
use log::{error, log, Level};
use roster_core::StudentStore;

/// Operation selected by the request method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudentOperation {
    List,
    Create,
    Delete,
}

impl StudentOperation {
    /// Maps a method name (any case) to an operation.
    pub fn from_method(method: &str) -> Option<Self> {
        if method.eq_ignore_ascii_case("GET") {
            Some(Self::List)
        } else if method.eq_ignore_ascii_case("POST") {
            Some(Self::Create)
        } else if method.eq_ignore_ascii_case("DELETE") {
            Some(Self::Delete)
        } else {
            None
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Create => "create",
            Self::Delete => "delete",
        }
    }
}

/// Routes one request to List, Create or Delete.
pub async fn dispatch_students<S: StudentStore>(
    State(state): State<AppState<S>>,
    request: Request,
) -> Response {
    let Some(operation) = StudentOperation::from_method(request.method().as_str()) else {
        return ApiError::MethodNotAllowed.into_response();
    };

    let (parts, body) = request.into_parts();
    let result = match operation {
        StudentOperation::List => list_students(&state).await,
        StudentOperation::Create => create_student(&state, body).await,
        StudentOperation::Delete => delete_student(&state, &parts.uri).await,
    };

    match result {
        Ok(response) => response,
        Err(err) => {
            match err.log_level() {
                Some(Level::Error) => error!(
                    "event=request_failed module=api status=error operation={} error_code={} error={}",
                    operation.name(),
                    err.code(),
                    err
                ),
                Some(level) => log!(
                    level,
                    "event=request_rejected module=api status=rejected operation={} error_code={}",
                    operation.name(),
                    err.code()
                ),
                None => {}
            }
            err.into_response()
        }
    }
}
