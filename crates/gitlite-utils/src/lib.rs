//! Shared helpers for gitlite.

pub mod date;

/// Errors from utility operations.
#[derive(Debug, thiserror::Error)]
pub enum UtilError {
    #[error("date parse error: {0}")]
    DateParse(String),
}

pub type Result<T> = std::result::Result<T, UtilError>;
