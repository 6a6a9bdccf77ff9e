use thiserror::Error;

/// Errors surfaced at the application boundary.
///
/// Tokenizer and parser conditions are never raised as errors; they are
/// collected as [`crate::parser::Diagnostic`] values alongside a best-effort
/// result.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid field value: {0}")]
    InvalidValue(String),

    #[error("Field is read-only: {0}")]
    ReadOnlyField(String),

    #[error("Field not found: {0}")]
    FieldNotFound(String),
}

pub type Result<T> = std::result::Result<T, Error>;
