//! Server lifecycle: store bootstrap, router assembly and serving.

use crate::api::{router, AppState};
use crate::config::ServerConfig;
use axum::Router;
use log::{error, info};
use roster_core::db::init_db;
use roster_core::SqliteStudentStore;
use tokio::net::TcpListener;

/// HTTP server backed by the SQLite student store.
pub struct Server {
    config: ServerConfig,
}

impl Server {
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Builds the router (for testing or embedding).
    pub fn router(&self) -> Router {
        let store = SqliteStudentStore::new(self.config.store_config());
        router(AppState::new(
            store,
            self.config.payload_codec,
            self.config.public_dir.clone(),
        ))
    }

    /// Ensures the students table exists.
    ///
    /// Failure is logged and returned; `run` keeps serving so that requests
    /// report the storage error themselves.
    pub fn init_store(&self) -> Result<(), roster_core::db::DbError> {
        let db_path = self.config.db_path.display();
        info!("event=schema_init module=server status=start db_path={db_path}");
        match init_db(&self.config.db_path) {
            Ok(_conn) => {
                info!("event=schema_init module=server status=ok db_path={db_path}");
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=schema_init module=server status=error db_path={} error={}",
                    db_path, err
                );
                Err(err)
            }
        }
    }

    /// Initializes the store, binds the listener and serves until shutdown.
    pub async fn run(self) -> Result<(), std::io::Error> {
        let _ = self.init_store();

        let listener = TcpListener::bind(self.config.socket_addr()).await?;
        let local_addr = listener.local_addr()?;
        info!(
            "event=server_listen module=server status=ok addr={} codec={} public_dir={}",
            local_addr,
            self.config.payload_codec,
            self.config.public_dir.display()
        );

        axum::serve(listener, self.router()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_store_creates_database_file() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("students.db");
        let server = Server::new(ServerConfig::builder().db_path(&db_path).build());

        server.init_store().unwrap();
        assert!(db_path.exists());
    }

    #[test]
    fn init_store_reports_unusable_path() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("missing").join("students.db");
        let server = Server::new(ServerConfig::builder().db_path(db_path).build());

        assert!(server.init_store().is_err());
    }

    #[test]
    fn test_router_builds() {
        let server = Server::new(ServerConfig::default());
        let _router = server.router();
    }
}
