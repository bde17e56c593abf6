//! Student payload codec.
//!
//! Two decoders share one contract: every known field comes back as a
//! string, and a missing key is `""` rather than an error.
//!
//! - `PayloadCodec::Structured` parses real JSON and rejects bodies that are
//!   not a flat object. A repeated key keeps its first value, like the
//!   pattern decoder.
//! - `PayloadCodec::Pattern` matches `"key":"value"` literally and never
//!   fails. It does not unescape `\"`, so a value holding a quote character
//!   is cut at that quote. Non-string values decode to `""`.

use crate::model::student::{StudentRecord, STUDENT_FIELDS};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

static FIELD_PATTERNS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    STUDENT_FIELDS
        .iter()
        .filter_map(|field| field_pattern(field).map(|pattern| (*field, pattern)))
        .collect()
});

/// Decoder selection for Create bodies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayloadCodec {
    /// Full JSON decoding of a flat object.
    #[default]
    Structured,
    /// Fixed-pattern extraction compatible with legacy clients.
    Pattern,
}

impl PayloadCodec {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Structured => "structured",
            Self::Pattern => "pattern",
        }
    }
}

impl FromStr for PayloadCodec {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "structured" | "json" => Ok(Self::Structured),
            "pattern" | "legacy" => Ok(Self::Pattern),
            other => Err(format!(
                "unsupported payload codec `{other}`; expected structured|pattern"
            )),
        }
    }
}

impl Display for PayloadCodec {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Codec failure.
#[derive(Debug)]
pub enum PayloadError {
    /// Body is not a JSON object.
    Malformed(String),
    /// A known field holds an array or object.
    UnsupportedValue { field: &'static str },
    Encode(serde_json::Error),
}

impl Display for PayloadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed(message) => write!(f, "malformed payload: {message}"),
            Self::UnsupportedValue { field } => {
                write!(f, "field `{field}` must be a string or scalar value")
            }
            Self::Encode(err) => write!(f, "failed to encode students: {err}"),
        }
    }
}

impl Error for PayloadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Encode(err) => Some(err),
            Self::Malformed(_) | Self::UnsupportedValue { .. } => None,
        }
    }
}

/// Decodes a Create body into a record using the selected codec.
///
/// The result is not validated; required-field checks belong to the caller.
pub fn decode_student(body: &str, codec: PayloadCodec) -> Result<StudentRecord, PayloadError> {
    match codec {
        PayloadCodec::Structured => decode_structured(body),
        PayloadCodec::Pattern => Ok(decode_pattern(body)),
    }
}

/// Returns the first `"key":"value"` match for `key`, or `""`.
///
/// Never fails. Keys outside the record schema are matched too.
pub fn extract_field(body: &str, key: &str) -> String {
    if let Some((_, pattern)) = FIELD_PATTERNS.iter().find(|(field, _)| *field == key) {
        return capture_value(pattern, body);
    }
    match field_pattern(key) {
        Some(pattern) => capture_value(&pattern, body),
        None => String::new(),
    }
}

/// Encodes records as a JSON array of six-key objects.
pub fn encode_student_list(students: &[StudentRecord]) -> Result<String, PayloadError> {
    serde_json::to_string(students).map_err(PayloadError::Encode)
}

/// Top-level JSON object keeping the first value of a repeated key.
struct FirstWinsObject(Map<String, Value>);

impl<'de> Deserialize<'de> for FirstWinsObject {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(FirstWinsVisitor)
    }
}

struct FirstWinsVisitor;

impl<'de> Visitor<'de> for FirstWinsVisitor {
    type Value = FirstWinsObject;

    fn expecting(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("a JSON object")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut fields = Map::new();
        while let Some((key, value)) = access.next_entry::<String, Value>()? {
            fields.entry(key).or_insert(value);
        }
        Ok(FirstWinsObject(fields))
    }
}

fn decode_structured(body: &str) -> Result<StudentRecord, PayloadError> {
    let FirstWinsObject(fields) = serde_json::from_str(body)
        .map_err(|err| PayloadError::Malformed(err.to_string()))?;

    let mut record = StudentRecord::default();
    for field in STUDENT_FIELDS {
        let text = match fields.get(field) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(text)) => text.clone(),
            Some(Value::Number(number)) => number.to_string(),
            Some(Value::Bool(flag)) => flag.to_string(),
            Some(Value::Array(_)) | Some(Value::Object(_)) => {
                return Err(PayloadError::UnsupportedValue { field });
            }
        };
        record.set_field(field, text);
    }
    Ok(record)
}

fn decode_pattern(body: &str) -> StudentRecord {
    let mut record = StudentRecord::default();
    for field in STUDENT_FIELDS {
        record.set_field(field, extract_field(body, field));
    }
    record
}

fn field_pattern(key: &str) -> Option<Regex> {
    Regex::new(&format!(r#""{}":"([^"]*)""#, regex::escape(key))).ok()
}

fn capture_value(pattern: &Regex, body: &str) -> String {
    pattern
        .captures(body)
        .and_then(|captures| captures.get(1))
        .map(|value| value.as_str().to_string())
        .unwrap_or_default()
}
