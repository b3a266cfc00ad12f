//! Inference Input Validation
//!
//! Checks model inputs before they reach a model: every schema column is
//! present, numeric and finite, continuous features fall in plausible
//! ranges, and categorical codes exist in the vocabulary.

mod error;
mod validator;

pub use error::{ValidationError, ValidationErrors};
pub use validator::{ValidationConfig, Validator};
