//! Roster table definition.
//!
//! # Invariants
//! - All six columns are TEXT; `register_number` is the primary key.
//! - Creation is idempotent and never rewrites an existing table.

use super::DbResult;
use rusqlite::Connection;

/// Table holding one row per student record.
pub const STUDENTS_TABLE: &str = "students";

const CREATE_STUDENTS_SQL: &str = "CREATE TABLE IF NOT EXISTS students (
    register_number TEXT PRIMARY KEY,
    name TEXT,
    department TEXT,
    year TEXT,
    phone TEXT,
    email TEXT
);";

/// Creates the `students` table when it does not exist yet.
pub fn ensure_schema(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(CREATE_STUDENTS_SQL)?;
    Ok(())
}
