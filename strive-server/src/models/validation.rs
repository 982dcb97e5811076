//! Validation error types

use std::fmt;

use serde::de::DeserializeOwned;

/// Validation error for client payloads
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Required field absent from the payload
    MissingField { field: String },

    /// Field present but of the wrong type or out of range
    InvalidType { field: String, reason: String },

    /// Field is empty when it shouldn't be
    Empty { field: &'static str },

    /// String doesn't match required format (e.g., object id)
    InvalidFormat { field: &'static str, reason: &'static str },

    /// Body is not JSON at all
    Malformed { reason: String },
}

impl ValidationError {
    /// Path of the offending field, if the error concerns one.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::MissingField { field } | Self::InvalidType { field, .. } => Some(field.as_str()),
            Self::Empty { field } | Self::InvalidFormat { field, .. } => Some(*field),
            Self::Malformed { .. } => None,
        }
    }

    /// Whether the body failed to parse as JSON (as opposed to not matching
    /// the schema).
    pub fn is_syntax(&self) -> bool {
        matches!(self, Self::Malformed { .. })
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField { field } => write!(f, "{} is required", field),
            Self::InvalidType { field, reason } => write!(f, "{}: {}", field, reason),
            Self::Empty { field } => write!(f, "{} cannot be empty", field),
            Self::InvalidFormat { field, reason } => write!(f, "{}: {}", field, reason),
            Self::Malformed { reason } => write!(f, "malformed JSON body: {}", reason),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Deserialize a JSON payload, reporting the path of the first offending
/// field. Unknown fields are ignored.
pub fn parse_json<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, ValidationError> {
    let mut de = serde_json::Deserializer::from_slice(bytes);
    let value = serde_path_to_error::deserialize(&mut de).map_err(|err| {
        let path = err.path().to_string();
        let inner = err.into_inner();

        if inner.is_syntax() || inner.is_eof() {
            return ValidationError::Malformed {
                reason: inner.to_string(),
            };
        }

        let message = inner.to_string();
        if let Some(name) = missing_field_name(&message) {
            return ValidationError::MissingField {
                field: join_path(&path, name),
            };
        }

        ValidationError::InvalidType {
            field: if path == "." { "body".to_string() } else { path },
            reason: strip_position(&message).to_string(),
        }
    })?;

    de.end().map_err(|e| ValidationError::Malformed {
        reason: e.to_string(),
    })?;
    Ok(value)
}

/// serde reports missing fields as "missing field `name`" on the parent path.
fn missing_field_name(message: &str) -> Option<&str> {
    let rest = message.strip_prefix("missing field `")?;
    rest.split('`').next()
}

fn join_path(parent: &str, name: &str) -> String {
    if parent == "." {
        name.to_string()
    } else {
        format!("{}.{}", parent, name)
    }
}

/// Drop serde_json's trailing " at line X column Y".
fn strip_position(message: &str) -> &str {
    match message.rfind(" at line ") {
        Some(idx) => &message[..idx],
        None => message,
    }
}
