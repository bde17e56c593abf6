//! Core domain logic for the student roster service.
//! Owns the record model, the SQLite store and the payload codec; the HTTP
//! layer only translates requests into calls on these types.

pub mod codec;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use codec::payload::{
    decode_student, encode_student_list, extract_field, PayloadCodec, PayloadError,
};
pub use logging::{default_log_level, init_logging, logging_status, LogTarget};
pub use model::student::{StudentRecord, StudentValidationError, STUDENT_FIELDS};
pub use repo::student_repo::{
    RepoError, RepoResult, SqliteStudentRepository, StudentRepository,
};
pub use service::student_service::{SqliteStudentStore, StoreConfig, StudentStore};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
