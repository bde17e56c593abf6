//! Server configuration.
//!
//! Every location the server touches (bind address, database file, public
//! root) is carried here and passed down explicitly.

use roster_core::{PayloadCodec, StoreConfig};
use serde::Deserialize;
use std::path::PathBuf;

/// HTTP server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to (default: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (default: 8080)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory served for non-API paths (default: "public")
    #[serde(default = "default_public_dir")]
    pub public_dir: PathBuf,

    /// SQLite database file (default: "students.db")
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    /// Decoder used for Create bodies.
    #[serde(default)]
    pub payload_codec: PayloadCodec,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_public_dir() -> PathBuf {
    PathBuf::from("public")
}

fn default_db_path() -> PathBuf {
    StoreConfig::default().db_path
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            public_dir: default_public_dir(),
            db_path: default_db_path(),
            payload_codec: PayloadCodec::default(),
        }
    }
}

impl ServerConfig {
    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder::default()
    }

    /// Returns the `host:port` string the listener binds to.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Storage settings derived from this configuration.
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig::new(self.db_path.clone())
    }
}

/// Builder for `ServerConfig`; unset fields keep their defaults.
#[derive(Debug, Default)]
pub struct ServerConfigBuilder {
    host: Option<String>,
    port: Option<u16>,
    public_dir: Option<PathBuf>,
    db_path: Option<PathBuf>,
    payload_codec: Option<PayloadCodec>,
}

impl ServerConfigBuilder {
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn public_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.public_dir = Some(dir.into());
        self
    }

    pub fn db_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.db_path = Some(path.into());
        self
    }

    pub fn payload_codec(mut self, codec: PayloadCodec) -> Self {
        self.payload_codec = Some(codec);
        self
    }

    pub fn build(self) -> ServerConfig {
        ServerConfig {
            host: self.host.unwrap_or_else(default_host),
            port: self.port.unwrap_or_else(default_port),
            public_dir: self.public_dir.unwrap_or_else(default_public_dir),
            db_path: self.db_path.unwrap_or_else(default_db_path),
            payload_codec: self.payload_codec.unwrap_or_default(),
        }
    }
}
