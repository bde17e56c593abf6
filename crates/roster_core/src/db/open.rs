//! Connection bootstrap utilities for SQLite.
//!
//! # Responsibility
//! - Create the database and its schema once at startup (`init_db`).
//! - Open request-scoped connections that run no statements of their own
//!   (`open_db`).
//! - Configure the busy timeout used to wait on concurrent writers.
//!
//! # Invariants
//! - `open_db` never creates the database file or the schema.
//! - Connections from `init_db` and `open_db_in_memory` have the
//!   `students` table available.

use super::schema::ensure_schema;
use super::DbResult;
use log::{debug, error, info};
use rusqlite::{Connection, OpenFlags};
use std::path::Path;
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Creates the database file when absent and ensures the schema.
///
/// # Side effects
/// - Creates the database file if missing.
/// - Emits `db_init` logging events with duration and status.
pub fn init_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    let started_at = Instant::now();
    let conn = open_with("file", || Connection::open(path.as_ref()))?;

    match ensure_schema(&conn) {
        Ok(()) => {
            info!(
                "event=db_init module=db status=ok duration_ms={}",
                started_at.elapsed().as_millis()
            );
            Ok(conn)
        }
        Err(err) => {
            error!(
                "event=db_init module=db status=error duration_ms={} error_code=schema_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

/// Opens an existing database file for one store operation.
///
/// Fails when the file does not exist. Called once per store operation, so
/// success is logged at `debug` level.
///
/// # Side effects
/// - Emits `db_open` logging events with duration and status.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
        | OpenFlags::SQLITE_OPEN_URI
        | OpenFlags::SQLITE_OPEN_NO_MUTEX;
    open_with("file", || Connection::open_with_flags(path.as_ref(), flags))
}

/// Opens an in-memory SQLite database with the schema applied.
///
/// # Side effects
/// - Emits `db_open` logging events with duration and status.
pub fn open_db_in_memory() -> DbResult<Connection> {
    let conn = open_with("memory", Connection::open_in_memory)?;
    ensure_schema(&conn)?;
    Ok(conn)
}

fn open_with(
    mode: &str,
    open: impl FnOnce() -> rusqlite::Result<Connection>,
) -> DbResult<Connection> {
    let started_at = Instant::now();

    let conn = match open() {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={} duration_ms={} error_code=db_open_failed error={}",
                mode,
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }
    };

    match conn.busy_timeout(BUSY_TIMEOUT) {
        Ok(()) => {
            debug!(
                "event=db_open module=db status=ok mode={} duration_ms={}",
                mode,
                started_at.elapsed().as_millis()
            );
            Ok(conn)
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={} duration_ms={} error_code=db_configure_failed error={}",
                mode,
                started_at.elapsed().as_millis(),
                err
            );
            Err(err.into())
        }
    }
}
