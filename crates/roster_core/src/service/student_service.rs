//! Student store service.
//!
//! # Responsibility
//! - Provide list/add/delete entry points for request handlers.
//! - Acquire one SQLite connection per call and release it on every path.
//!
//! # Invariants
//! - No records are cached between calls.
//! - Each call performs exactly one repository statement; the schema is
//!   created by `db::init_db` at startup, never here.

use crate::db::open_db;
use crate::model::student::StudentRecord;
use crate::repo::student_repo::{
    RepoResult, SqliteStudentRepository, StudentRepository,
};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const DEFAULT_DB_PATH: &str = "students.db";

/// Location of the backing database.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,
}

fn default_db_path() -> PathBuf {
    PathBuf::from(DEFAULT_DB_PATH)
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
        }
    }
}

impl StoreConfig {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }
}

/// Storage collaborator contract used by the record API.
///
/// Implementations are called from blocking threads and must be shareable
/// across requests.
pub trait StudentStore: Send + Sync + 'static {
    /// Returns every record ordered by register number.
    fn list_students(&self) -> RepoResult<Vec<StudentRecord>>;
    /// Inserts one record. Duplicates fail with `RepoError::Duplicate`.
    fn add_student(&self, record: &StudentRecord) -> RepoResult<()>;
    /// Deletes by register number and returns how many rows matched.
    fn delete_student(&self, register_number: &str) -> RepoResult<usize>;
}

/// SQLite-backed store opening a fresh connection per operation.
#[derive(Debug, Clone)]
pub struct SqliteStudentStore {
    config: StoreConfig,
}

impl SqliteStudentStore {
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    pub fn db_path(&self) -> &Path {
        &self.config.db_path
    }

    fn with_repo<T>(
        &self,
        op: impl FnOnce(&SqliteStudentRepository<'_>) -> RepoResult<T>,
    ) -> RepoResult<T> {
        let conn = open_db(&self.config.db_path)?;
        let repo = SqliteStudentRepository::new(&conn);
        op(&repo)
    }
}

impl StudentStore for SqliteStudentStore {
    fn list_students(&self) -> RepoResult<Vec<StudentRecord>> {
        self.with_repo(|repo| repo.list_students())
    }

    fn add_student(&self, record: &StudentRecord) -> RepoResult<()> {
        self.with_repo(|repo| repo.insert_student(record))
    }

    fn delete_student(&self, register_number: &str) -> RepoResult<usize> {
        self.with_repo(|repo| repo.delete_student(register_number))
    }
}

#[cfg(test)]
mod tests {
    use super::{SqliteStudentStore, StoreConfig, StudentStore};
    use crate::db::init_db;
    use crate::model::student::StudentRecord;
    use rusqlite::Connection;

    #[test]
    fn default_config_points_at_students_db() {
        assert_eq!(
            StoreConfig::default().db_path.to_str(),
            Some("students.db")
        );
    }

    #[test]
    fn records_survive_across_connections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roster.db");
        init_db(&path).unwrap();
        let store = SqliteStudentStore::new(StoreConfig::new(path));

        store.add_student(&StudentRecord::new("R1", "Alice")).unwrap();

        let students = store.list_students().unwrap();
        assert_eq!(students, vec![StudentRecord::new("R1", "Alice")]);
        assert_eq!(store.delete_student("R1").unwrap(), 1);
        assert!(store.list_students().unwrap().is_empty());
    }

    #[test]
    fn store_calls_never_create_the_schema() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bare.db");
        Connection::open(&path)
            .unwrap()
            .execute_batch("CREATE TABLE unrelated (x TEXT);")
            .unwrap();
        let store = SqliteStudentStore::new(StoreConfig::new(&path));

        assert!(store.list_students().is_err());

        let conn = Connection::open(&path).unwrap();
        let exists: i64 = conn
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'students');",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(exists, 0);
    }

    #[test]
    fn store_calls_never_create_a_missing_database_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.db");
        let store = SqliteStudentStore::new(StoreConfig::new(&path));

        assert!(store.delete_student("R1").is_err());
        assert!(!path.exists());
    }
}
