//! Roster domain model.
//!
//! # Responsibility
//! - Define the canonical student record persisted by the store.
//! - Own the required-field rules shared by the codec and repository.
//!
//! # Invariants
//! - Every record is identified by a non-empty `register_number`.
//! - Optional fields are empty strings, never absent.

pub mod student;
