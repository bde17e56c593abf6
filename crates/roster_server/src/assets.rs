//! Static asset server for the front-end.
//!
//! # Invariants
//! - Only regular files under the public root are served.
//! - `/` maps to `index.html`.
//! - Misses, directories and paths leaving the root answer 404.

use axum::extract::State;
use axum::http::{header, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use log::{debug, warn};
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

pub const NOT_FOUND_BODY: &str = "404 (Not Found)";

const INDEX_DOCUMENT: &str = "index.html";

/// Directory the asset server reads from.
#[derive(Debug, Clone)]
pub struct AssetRoot(Arc<PathBuf>);

impl AssetRoot {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self(Arc::new(dir.into()))
    }

    pub fn path(&self) -> &Path {
        self.0.as_path()
    }

    /// Maps a request path to a file path under the root.
    ///
    /// Returns `None` for paths containing `..` or other non-plain components.
    pub fn resolve(&self, request_path: &str) -> Option<PathBuf> {
        let relative = request_path.trim_start_matches('/');
        let relative = if relative.is_empty() {
            INDEX_DOCUMENT
        } else {
            relative
        };

        let mut resolved = self.0.to_path_buf();
        for component in Path::new(relative).components() {
            match component {
                Component::Normal(part) => resolved.push(part),
                _ => return None,
            }
        }
        Some(resolved)
    }
}

/// Content type by file extension.
pub fn content_type_for(path: &str) -> &'static str {
    if path.ends_with(".html") {
        "text/html"
    } else if path.ends_with(".css") {
        "text/css"
    } else if path.ends_with(".js") {
        "application/javascript"
    } else {
        "text/plain"
    }
}

/// Serves the file behind the request path.
pub async fn serve_asset(State(root): State<AssetRoot>, uri: Uri) -> Response {
    let Some(file_path) = root.resolve(uri.path()) else {
        debug!("event=asset_miss module=assets status=rejected reason=path_escape");
        return not_found();
    };

    match tokio::fs::metadata(&file_path).await {
        Ok(metadata) if metadata.is_file() => {}
        _ => {
            debug!(
                "event=asset_miss module=assets status=not_found path={}",
                uri.path()
            );
            return not_found();
        }
    }

    match tokio::fs::read(&file_path).await {
        Ok(content) => {
            let content_type = content_type_for(&file_path.to_string_lossy());
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, content_type)],
                content,
            )
                .into_response()
        }
        Err(err) => {
            warn!(
                "event=asset_read module=assets status=error path={} error={}",
                file_path.display(),
                err
            );
            not_found()
        }
    }
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, NOT_FOUND_BODY).into_response()
}
