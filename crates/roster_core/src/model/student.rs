//! Student record model.
//!
//! # Responsibility
//! - Define the six-field record shared by storage and wire format.
//! - Validate required fields before any persistence attempt.
//!
//! # Invariants
//! - `register_number` is the unique key of a record in the store.
//! - `register_number` and `name` are non-empty for valid records.
//! - Field declaration order is the wire key order of List output.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Ordered wire/column names of a student record.
pub const STUDENT_FIELDS: [&str; 6] = [
    "register_number",
    "name",
    "department",
    "year",
    "phone",
    "email",
];

/// One student's profile, keyed by register number.
///
/// Serialization keeps declaration order, so the JSON object always carries
/// exactly the six keys in `STUDENT_FIELDS` order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRecord {
    /// Unique identifier, also the table primary key.
    pub register_number: String,
    pub name: String,
    pub department: String,
    pub year: String,
    pub phone: String,
    pub email: String,
}

/// Validation failures for `StudentRecord` required fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudentValidationError {
    MissingRegisterNumber,
    MissingName,
}

impl Display for StudentValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingRegisterNumber => write!(f, "register_number must not be empty"),
            Self::MissingName => write!(f, "name must not be empty"),
        }
    }
}

impl Error for StudentValidationError {}

impl StudentRecord {
    /// Creates a record with required fields set and optional fields empty.
    pub fn new(register_number: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            register_number: register_number.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// Checks that required fields carry a value.
    ///
    /// Whitespace is significant: `" "` counts as a value, matching how the
    /// record would be stored.
    pub fn validate(&self) -> Result<(), StudentValidationError> {
        if self.register_number.is_empty() {
            return Err(StudentValidationError::MissingRegisterNumber);
        }
        if self.name.is_empty() {
            return Err(StudentValidationError::MissingName);
        }
        Ok(())
    }

    /// Sets one field by its wire name. Unknown names are ignored.
    pub fn set_field(&mut self, field: &str, value: String) {
        match field {
            "register_number" => self.register_number = value,
            "name" => self.name = value,
            "department" => self.department = value,
            "year" => self.year = value,
            "phone" => self.phone = value,
            "email" => self.email = value,
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{StudentRecord, StudentValidationError};

    #[test]
    fn new_record_has_empty_optional_fields() {
        let record = StudentRecord::new("R1", "Alice");
        assert_eq!(record.department, "");
        assert_eq!(record.email, "");
        assert!(record.validate().is_ok());
    }

    #[test]
    fn validate_rejects_missing_required_fields() {
        let record = StudentRecord::new("", "Bob");
        assert_eq!(
            record.validate(),
            Err(StudentValidationError::MissingRegisterNumber)
        );

        let record = StudentRecord::new("R9", "");
        assert_eq!(record.validate(), Err(StudentValidationError::MissingName));
    }

    #[test]
    fn serializes_in_fixed_key_order() {
        let mut record = StudentRecord::new("R1", "Alice");
        record.set_field("email", "a@x.com".to_string());
        record.set_field("unknown", "ignored".to_string());

        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"register_number":"R1","name":"Alice","department":"","year":"","phone":"","email":"a@x.com"}"#
        );
    }
}
