use thiserror::Error;

/// Error type for password operations.
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    /// The stored hash record could not be parsed. Unlike a mismatch this
    /// indicates corrupted or truncated data and deserves a louder log line.
    #[error("Stored password hash is malformed: {0}")]
    InvalidHash(String),

    #[error("Password verification failed: {0}")]
    VerificationFailed(String),
}
