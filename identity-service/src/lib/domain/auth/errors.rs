use thiserror::Error;

use auth::PasswordError;
use auth::TokenError;

use crate::domain::user::errors::EmailError;
use crate::domain::user::errors::UserIdError;
use crate::domain::user::errors::UsernameError;

/// Top-level error for all authentication operations
///
/// Client-facing variants are reported verbatim. `InvalidCredentials`
/// deliberately conflates "no such user" and "wrong password" so callers
/// cannot enumerate accounts. The internal variants (`Storage`, `Hashing`,
/// `Signing`, `Unknown`) carry detail for logs; the transport layer should
/// surface them as a generic failure.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    // Value object validation errors (automatically converted via #[from])
    #[error("Invalid user ID: {0}")]
    InvalidUserId(#[from] UserIdError),

    #[error("Invalid username: {0}")]
    InvalidUsername(#[from] UsernameError),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    // Client errors
    #[error("Username already exists: {0}")]
    UsernameAlreadyExists(String),

    #[error("Email already exists: {0}")]
    EmailAlreadyExists(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Current password does not match")]
    InvalidCurrentPassword,

    #[error("User not found: {0}")]
    NotFound(String),

    // Token errors
    /// Signature mismatch; always treated as an active-attack signal.
    #[error("Token signature is invalid")]
    TokenTampered,

    /// Benign lifecycle event: the token outlived its TTL.
    #[error("Token is expired")]
    TokenExpired,

    /// Authentic signature, but the token id was revoked or never recorded.
    #[error("Refresh token is not registered")]
    TokenNotRegistered,

    // Infrastructure errors
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Password hashing error: {0}")]
    Hashing(String),

    #[error("Token signing error: {0}")]
    Signing(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<TokenError> for AuthError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Tampered => AuthError::TokenTampered,
            TokenError::Expired => AuthError::TokenExpired,
            TokenError::SigningFailed(msg) => AuthError::Signing(msg),
        }
    }
}

impl From<PasswordError> for AuthError {
    fn from(err: PasswordError) -> Self {
        AuthError::Hashing(err.to_string())
    }
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        AuthError::Unknown(err.to_string())
    }
}
