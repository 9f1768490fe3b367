use serde::Deserialize;
use serde::Serialize;

/// Claims carried by a short-lived access token.
///
/// Access tokens are stateless: validity is established by signature and
/// expiry alone, never by a lookup. The role and permission snapshot is
/// taken at issuance and goes stale on the next refresh at the latest.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccessClaims {
    /// Subject (user identifier)
    pub sub: String,

    /// Role name at issuance
    pub role: String,

    /// Permission snapshot at issuance
    pub permissions: Vec<String>,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

/// Claims carried by a long-lived refresh token.
///
/// The `jti` is the handle a revocation registry tracks; holders exchange
/// the token for fresh access tokens until it expires or is revoked.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RefreshClaims {
    /// Subject (user identifier)
    pub sub: String,

    /// Unique token identifier
    pub jti: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}
