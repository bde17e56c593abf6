//! `roster` binary: parses configuration, starts logging and serves.

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use log::info;
use roster_core::{core_version, default_log_level, init_logging, PayloadCodec};
use roster_server::{Server, ServerConfig};
use std::path::PathBuf;

/// Student roster HTTP service
#[derive(Parser, Debug)]
#[command(name = "roster")]
#[command(version, about, long_about = None)]
struct Args {
    /// Host to bind to
    #[arg(long, env = "ROSTER_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Port to bind to
    #[arg(long, env = "ROSTER_PORT", default_value_t = 8080)]
    port: u16,

    /// SQLite database file
    #[arg(long = "db", env = "ROSTER_DB", default_value = "students.db")]
    db_path: PathBuf,

    /// Directory holding the front-end files
    #[arg(long, env = "ROSTER_PUBLIC_DIR", default_value = "public")]
    public_dir: PathBuf,

    /// Create payload decoder: structured | pattern
    #[arg(long, env = "ROSTER_PAYLOAD_CODEC", default_value = "structured")]
    payload_codec: PayloadCodec,

    /// Log level: trace | debug | info | warn | error
    #[arg(long, env = "ROSTER_LOG_LEVEL")]
    log_level: Option<String>,

    /// Absolute directory for rotating log files (stderr when unset)
    #[arg(long, env = "ROSTER_LOG_DIR")]
    log_dir: Option<String>,
}

impl Args {
    fn server_config(&self) -> ServerConfig {
        ServerConfig::builder()
            .host(self.host.clone())
            .port(self.port)
            .db_path(self.db_path.clone())
            .public_dir(self.public_dir.clone())
            .payload_codec(self.payload_codec)
            .build()
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let level = args.log_level.as_deref().unwrap_or(default_log_level());
    init_logging(level, args.log_dir.as_deref()).map_err(|err| anyhow!(err))?;
    info!(
        "event=cli_start module=cli status=ok version={}",
        core_version()
    );

    let config = args.server_config();
    let addr = config.socket_addr();
    Server::new(config)
        .run()
        .await
        .with_context(|| format!("server on {addr} stopped"))?;
    Ok(())
}
