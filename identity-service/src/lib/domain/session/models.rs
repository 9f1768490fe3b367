use std::fmt;

use chrono::DateTime;
use chrono::Utc;

use crate::domain::user::models::UserId;

/// Refresh token unique identifier type
///
/// Opaque and unguessable; minted at token issuance (UUID v4) and carried in
/// the token's `jti` claim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RefreshTokenId(String);

impl RefreshTokenId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RefreshTokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One live refresh token.
///
/// `user_id` references the owner, it does not own the account record.
/// Created on login, destroyed on logout, on password change (in bulk), or
/// lazily once the embedded expiry has passed.
#[derive(Debug, Clone)]
pub struct SessionRecord {
    pub token_id: RefreshTokenId,
    pub user_id: UserId,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl SessionRecord {
    pub fn new(
        token_id: RefreshTokenId,
        user_id: UserId,
        issued_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            token_id,
            user_id,
            issued_at,
            expires_at,
        }
    }
}
