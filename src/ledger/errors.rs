use thiserror::Error;

/// Validation failures from the write path. Any of these leaves the lists untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Description is required")]
    EmptyDescription,

    #[error("Category is required")]
    EmptyCategory,

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid date (expected YYYY-MM-DD): {0}")]
    InvalidDate(String),

    #[error("Invalid budget limit: {0}")]
    InvalidLimit(String),
}

pub type Result<T> = std::result::Result<T, LedgerError>;
