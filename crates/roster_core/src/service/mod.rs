//! Core use-case services.
//!
//! # Responsibility
//! - Expose the storage collaborator used by the HTTP layer.
//! - Own connection lifetime so callers never hold a connection.

pub mod student_service;
