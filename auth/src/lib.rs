//! Authentication infrastructure library
//!
//! Provides reusable authentication building blocks for services:
//! - Password hashing (Argon2id) with a configurable work factor
//! - Signed access/refresh token issuance and verification
//!
//! Each service defines its own domain types and adapts these implementations.
//! This avoids coupling services through shared domain logic while reducing
//! code duplication.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Tokens
//! ```
//! use chrono::Duration;
//!
//! use auth::TokenCodec;
//!
//! let codec = TokenCodec::new(
//!     b"secret_key_at_least_32_bytes_long!",
//!     Duration::minutes(15),
//!     Duration::days(7),
//! );
//!
//! // Login: mint an access/refresh pair
//! let access = codec
//!     .issue_access("user123", "user", vec!["reports.read".to_string()])
//!     .unwrap();
//! let refresh = codec.issue_refresh("user123").unwrap();
//!
//! // Per request: validate the access token statelessly
//! let claims = codec.verify_access(&access).unwrap();
//! assert_eq!(claims.sub, "user123");
//!
//! // On refresh: validate and look `jti` up in a revocation registry
//! let claims = codec.verify_refresh(&refresh.token).unwrap();
//! assert_eq!(claims.jti, refresh.token_id);
//! ```

pub mod password;
pub mod token;

// Re-export commonly used items
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::AccessClaims;
pub use token::IssuedRefresh;
pub use token::RefreshClaims;
pub use token::TokenCodec;
pub use token::TokenError;
