//! Data Validation
//!
//! Range and completeness checks for listing features before they are encoded.

mod error;
mod validator;

pub use error::ValidationError;
pub use validator::{ValidationConfig, ValidationResult, Validator};
