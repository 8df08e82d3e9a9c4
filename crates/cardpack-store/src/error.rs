//! Error types for cardpack storage.

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur in storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Database operation failed.
    #[error("database error: {0}")]
    Database(String),

    /// Serialization/deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// A user record already exists under this identifier.
    #[error("user already provisioned: {user_id}")]
    AlreadyExists {
        /// The account identifier that is already provisioned.
        user_id: String,
    },
}
