//! HTTP surface of the student roster service.
//!
//! Routes `/api/students` to the record API and every other path to the
//! static asset server.

pub mod api;
pub mod assets;
pub mod config;
pub mod server;

pub use api::{router, AppState};
pub use config::{ServerConfig, ServerConfigBuilder};
pub use server::Server;
