use thiserror::Error;

/// Errors that can occur when interacting with a cart store.
#[derive(Debug, Error)]
pub enum CartStoreError {
    /// A database error occurred.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A filesystem error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A serialization/deserialization error occurred.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for cart store operations.
pub type Result<T> = std::result::Result<T, CartStoreError>;
