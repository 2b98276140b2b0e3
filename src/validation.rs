//! Declarative field constraints checked at the input boundary.
//!
//! Each input type lists its constraints in one `validate()` body, e.g.
//!
//! ```ignore
//! impl Validate for NewNote {
//!     fn validate(&self) -> Result<(), ValidationError> {
//!         min_length("title", &self.title, 1)?;
//!         min_length("content", &self.content, 1)
//!     }
//! }
//! ```

use miette::Diagnostic;
use thiserror::Error;

/// A single failed field constraint.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
#[error("{field}: {message}")]
#[diagnostic(code(jot::validation))]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

/// Require at least `min` characters (not bytes).
pub fn min_length(field: &'static str, value: &str, min: usize) -> Result<(), ValidationError> {
    if value.chars().count() < min {
        return Err(ValidationError {
            field,
            message: format!("must be at least {} character(s) long", min),
        });
    }
    Ok(())
}

/// Apply `min_length` only when the optional field is present.
pub fn min_length_if_present(
    field: &'static str,
    value: Option<&str>,
    min: usize,
) -> Result<(), ValidationError> {
    match value {
        Some(v) => min_length(field, v, min),
        None => Ok(()),
    }
}
