//! Record API: router and shared state.
//!
//! # Responsibility
//! - Mount the student dispatcher at `/api/students`.
//! - Send every other path to the asset server.
//!
//! # Invariants
//! - The router holds no records; all data lives behind `StudentStore`.

pub mod dispatcher;
pub mod error;
pub mod students;

use crate::assets::{serve_asset, AssetRoot};
use axum::extract::FromRef;
use axum::routing::any;
use axum::Router;
use roster_core::{PayloadCodec, StudentStore};
use std::path::PathBuf;
use std::sync::Arc;

pub use dispatcher::{dispatch_students, StudentOperation};
pub use error::{ApiError, ApiResult};

/// Path of the record API.
pub const STUDENTS_PATH: &str = "/api/students";

/// State shared by all handlers.
pub struct AppState<S> {
    pub store: Arc<S>,
    pub codec: PayloadCodec,
    pub assets: AssetRoot,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            codec: self.codec,
            assets: self.assets.clone(),
        }
    }
}

impl<S: StudentStore> AppState<S> {
    pub fn new(store: S, codec: PayloadCodec, public_dir: impl Into<PathBuf>) -> Self {
        Self {
            store: Arc::new(store),
            codec,
            assets: AssetRoot::new(public_dir),
        }
    }
}

impl<S> FromRef<AppState<S>> for AssetRoot {
    fn from_ref(state: &AppState<S>) -> Self {
        state.assets.clone()
    }
}

/// Builds the full application router over any store implementation.
pub fn router<S: StudentStore>(state: AppState<S>) -> Router {
    Router::new()
        .route(STUDENTS_PATH, any(dispatch_students::<S>))
        .fallback(serve_asset)
        .with_state(state)
}
