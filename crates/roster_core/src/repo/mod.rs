//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the data access contract for student records.
//! - Isolate SQLite query details from the service and HTTP layers.
//!
//! # Invariants
//! - Repository writes enforce `StudentRecord::validate()` before persistence.
//! - Primary-key violations surface as `RepoError::Duplicate`, never as upserts.

pub mod student_repo;
