//! Student repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide list/insert/delete over the `students` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Each method issues exactly one statement.
//! - NULL columns read back as empty strings.

use crate::db::DbError;
use crate::model::student::{StudentRecord, StudentValidationError};
use rusqlite::{params, Connection, ErrorCode, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const STUDENT_SELECT_SQL: &str = "SELECT
    register_number,
    name,
    department,
    year,
    phone,
    email
FROM students
ORDER BY register_number ASC";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for student persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(StudentValidationError),
    Db(DbError),
    /// Insert hit an existing `register_number`.
    Duplicate(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::Duplicate(id) => write!(f, "student {id} already exists"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::Duplicate(_) => None,
        }
    }
}

impl From<StudentValidationError> for RepoError {
    fn from(value: StudentValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for student records.
pub trait StudentRepository {
    fn list_students(&self) -> RepoResult<Vec<StudentRecord>>;
    fn insert_student(&self, record: &StudentRecord) -> RepoResult<()>;
    /// Returns the number of removed rows (0 or 1).
    fn delete_student(&self, register_number: &str) -> RepoResult<usize>;
}

/// SQLite-backed student repository borrowing an open connection.
pub struct SqliteStudentRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteStudentRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl StudentRepository for SqliteStudentRepository<'_> {
    fn list_students(&self) -> RepoResult<Vec<StudentRecord>> {
        let mut stmt = self.conn.prepare(STUDENT_SELECT_SQL)?;
        let mut rows = stmt.query([])?;
        let mut students = Vec::new();

        while let Some(row) = rows.next()? {
            students.push(parse_student_row(row)?);
        }

        Ok(students)
    }

    fn insert_student(&self, record: &StudentRecord) -> RepoResult<()> {
        record.validate()?;

        let result = self.conn.execute(
            "INSERT INTO students (
                register_number,
                name,
                department,
                year,
                phone,
                email
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                record.register_number.as_str(),
                record.name.as_str(),
                record.department.as_str(),
                record.year.as_str(),
                record.phone.as_str(),
                record.email.as_str(),
            ],
        );

        match result {
            Ok(_) => Ok(()),
            Err(err) if is_constraint_violation(&err) => {
                Err(RepoError::Duplicate(record.register_number.clone()))
            }
            Err(err) => Err(err.into()),
        }
    }

    fn delete_student(&self, register_number: &str) -> RepoResult<usize> {
        let changed = self.conn.execute(
            "DELETE FROM students WHERE register_number = ?1;",
            [register_number],
        )?;
        Ok(changed)
    }
}

fn parse_student_row(row: &Row<'_>) -> RepoResult<StudentRecord> {
    Ok(StudentRecord {
        register_number: text_column(row, "register_number")?,
        name: text_column(row, "name")?,
        department: text_column(row, "department")?,
        year: text_column(row, "year")?,
        phone: text_column(row, "phone")?,
        email: text_column(row, "email")?,
    })
}

// Rows written outside this service may carry NULLs.
fn text_column(row: &Row<'_>, column: &str) -> rusqlite::Result<String> {
    Ok(row.get::<_, Option<String>>(column)?.unwrap_or_default())
}

fn is_constraint_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(failure, _) if failure.code == ErrorCode::ConstraintViolation
    )
}
