//! List / Create / Delete operations on student records.
//!
//! # Invariants
//! - Validation runs before any store access.
//! - Each operation makes at most one store call, on a blocking worker.

use super::error::{ApiError, ApiResult};
use super::AppState;
use axum::body::{to_bytes, Body};
use axum::http::{header, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use http_body_util::LengthLimitError;
use log::{debug, info};
use percent_encoding::percent_decode_str;
use roster_core::{decode_student, encode_student_list, StudentStore};
use std::sync::Arc;

pub const ADDED_BODY: &str = "Student added successfully";
pub const DELETED_BODY: &str = "Student deleted successfully";

/// Largest Create body accepted; bigger bodies answer 413.
pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// Returns every record as a JSON array.
pub async fn list_students<S: StudentStore>(state: &AppState<S>) -> ApiResult<Response> {
    let students = run_blocking(&state.store, |store| store.list_students()).await?;
    let body = encode_student_list(&students)?;

    info!(
        "event=student_list module=api status=ok count={}",
        students.len()
    );
    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        body,
    )
        .into_response())
}

/// Decodes the body, checks required fields and inserts one record.
pub async fn create_student<S: StudentStore>(
    state: &AppState<S>,
    body: Body,
) -> ApiResult<Response> {
    let bytes = to_bytes(body, MAX_BODY_BYTES).await.map_err(|err| {
        let inner = err.into_inner();
        if inner.downcast_ref::<LengthLimitError>().is_some() {
            ApiError::PayloadTooLarge
        } else {
            ApiError::Internal(format!("failed to read request body: {inner}"))
        }
    })?;
    let text = String::from_utf8_lossy(&bytes);

    let record = decode_student(&text, state.codec)?;
    if record.validate().is_err() {
        return Err(ApiError::MissingFields);
    }

    info!(
        "event=student_create module=api status=start register_number={}",
        record.register_number
    );
    let register_number = record.register_number.clone();
    run_blocking(&state.store, move |store| store.add_student(&record)).await?;
    info!(
        "event=student_create module=api status=ok register_number={}",
        register_number
    );

    Ok((StatusCode::OK, ADDED_BODY).into_response())
}

/// Deletes by the `id` query parameter; a missing row is not an error.
pub async fn delete_student<S: StudentStore>(
    state: &AppState<S>,
    uri: &Uri,
) -> ApiResult<Response> {
    let id = delete_id(uri).ok_or(ApiError::MissingId)?;

    let lookup = id.clone();
    let removed = run_blocking(&state.store, move |store| store.delete_student(&lookup)).await?;
    info!(
        "event=student_delete module=api status=ok register_number={} removed={}",
        id, removed
    );

    Ok((StatusCode::OK, DELETED_BODY).into_response())
}

/// Extracts the delete key from a query of the form `id=<value>[&...]`.
///
/// The value runs to the first `&` and is percent-decoded; `+` stays a
/// literal plus. Returns `None` unless the query starts with `id=` and the
/// decoded value is non-empty.
pub fn delete_id(uri: &Uri) -> Option<String> {
    let Some(rest) = uri.query().and_then(|query| query.strip_prefix("id=")) else {
        debug!("event=student_delete module=api status=rejected reason=query_shape");
        return None;
    };
    let raw = rest.split('&').next().unwrap_or_default();
    let id = percent_decode_str(raw).decode_utf8_lossy().into_owned();
    (!id.is_empty()).then_some(id)
}

async fn run_blocking<S, T, F>(store: &Arc<S>, op: F) -> ApiResult<T>
where
    S: StudentStore,
    T: Send + 'static,
    F: FnOnce(&S) -> roster_core::RepoResult<T> + Send + 'static,
{
    let store = Arc::clone(store);
    tokio::task::spawn_blocking(move || op(store.as_ref()))
        .await
        .map_err(|err| ApiError::Internal(format!("store worker failed: {err}")))?
        .map_err(ApiError::from)
}
