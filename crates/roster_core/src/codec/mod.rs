//! Wire-format codecs for student records.
//!
//! # Responsibility
//! - Decode Create payloads into `StudentRecord` field values.
//! - Encode record lists into the List response body.
//!
//! # Invariants
//! - A missing payload key always decodes to an empty string.
//! - Encoded objects carry exactly six keys in fixed order.

pub mod payload;
