// File: ./src/model/error.rs
use thiserror::Error;

/// Contract violations at the Task API boundary. Parsing itself never fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskError {
    #[error("'{0}' is not a YYYY-MM-DD date")]
    InvalidDate(String),
    #[error("'{0}' is not a valid list or tag name")]
    InvalidName(String),
    #[error("'{0}' is not a priority (expected A-Z or -)")]
    InvalidPriority(String),
    #[error("a creation date after the bare 'x ' of '{0}' would read as its completion date")]
    CreateDateAfterBareCompletion(String),
}
