use thiserror::Error;

/// Error type for token operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    /// Signature mismatch or structural damage. Anything that is not
    /// authentic ends up here, never as `Expired` or as decoded claims.
    #[error("Token signature or structure is invalid")]
    Tampered,

    /// Authentic token past its expiry. A benign lifecycle event.
    #[error("Token is expired")]
    Expired,

    #[error("Failed to sign token: {0}")]
    SigningFailed(String),
}
