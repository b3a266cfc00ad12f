//! Validation Error Types

use std::fmt;
use thiserror::Error;

/// A single problem with a model input
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Request body is not a JSON object
    #[error("Invalid request format: {0}")]
    InvalidFormat(String),

    /// Schema column absent from the request
    #[error("Missing required field: {0}")]
    MissingField(String),

    /// Key that is not a schema column
    #[error("Unknown field: {0}")]
    UnknownField(String),

    /// Value is not a number
    #[error("{field} must be a number")]
    NotNumeric { field: String },

    /// NaN or infinite value
    #[error("{field} must be finite")]
    NonFinite { field: String },

    /// Value out of allowed range
    #[error("{field} value {value} is out of range [{min}, {max}]")]
    OutOfRange {
        field: String,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Categorical code no vocabulary label maps to
    #[error("{field} code {code} is not in the vocabulary")]
    UnknownCategoryCode { field: String, code: f64 },
}

/// Every problem found in one input, in schema order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValidationErrors(pub Vec<ValidationError>);

impl ValidationErrors {
    /// Human-readable messages
    pub fn messages(&self) -> Vec<String> {
        self.0.iter().map(ToString::to_string).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} validation error(s): {}", self.0.len(), self.messages().join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        Self(vec![error])
    }
}
