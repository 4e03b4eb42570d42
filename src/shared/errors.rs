use thiserror::Error;

/// Errors surfaced by the todo store. Nothing here is retried or repaired.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Invalid todo: {0}")]
    Validation(String),

    #[error("Todo not found at index {index} ({len} todos)")]
    NotFound { index: i64, len: usize },

    #[error("Failed to read data file: {0}")]
    ReadError(#[source] std::io::Error),

    #[error("Failed to write data file: {0}")]
    WriteError(#[source] std::io::Error),

    #[error("Failed to parse data file: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Failed to serialize todos: {0}")]
    SerializeError(#[source] serde_json::Error),
}

impl StoreError {
    pub fn validation(msg: impl Into<String>) -> Self {
        StoreError::Validation(msg.into())
    }

    pub fn not_found(index: i64, len: usize) -> Self {
        StoreError::NotFound { index, len }
    }
}
