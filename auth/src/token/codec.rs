use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use super::claims::AccessClaims;
use super::claims::RefreshClaims;
use super::errors::TokenError;

/// A freshly minted refresh token.
pub struct IssuedRefresh {
    /// Raw token identifier (`jti`), for registry bookkeeping
    pub token_id: String,

    /// Signed compact token string, handed to the caller
    pub token: String,

    /// Issuance instant, mirrored in the token's `iat` claim
    pub issued_at: DateTime<Utc>,

    /// Expiry instant, mirrored in the token's `exp` claim
    pub expires_at: DateTime<Utc>,
}

/// Signs and verifies access and refresh tokens.
///
/// Uses HS256 (HMAC with SHA-256); the MAC comparison is constant-time with
/// respect to the secret. Access tokens self-validate so request handling
/// needs no registry lookup; refresh tokens carry a random `jti` that a
/// revocation registry must additionally confirm.
///
/// # Security Notes
/// - The secret should be at least 256 bits (32 bytes) for HS256
/// - Store secrets in environment variables or secure vaults, never in code
/// - Rotate secrets periodically
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenCodec {
    /// Create a new token codec.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens (should be stored securely)
    /// * `access_ttl` - Lifetime of issued access tokens
    /// * `refresh_ttl` - Lifetime of issued refresh tokens
    pub fn new(secret: &[u8], access_ttl: Duration, refresh_ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            access_ttl,
            refresh_ttl,
        }
    }

    /// Issue a signed access token.
    ///
    /// Expiry is issuance time plus the configured access TTL.
    ///
    /// # Arguments
    /// * `subject` - User identifier
    /// * `role` - Role name to embed
    /// * `permissions` - Permission snapshot to embed
    ///
    /// # Errors
    /// * `SigningFailed` - Token could not be serialized or signed
    pub fn issue_access(
        &self,
        subject: &str,
        role: &str,
        permissions: Vec<String>,
    ) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = AccessClaims {
            sub: subject.to_string(),
            role: role.to_string(),
            permissions,
            iat: now.timestamp(),
            exp: (now + self.access_ttl).timestamp(),
        };

        self.encode(&claims)
    }

    /// Issue a signed refresh token with a fresh random identifier.
    ///
    /// Returns both the raw `jti` (for registry bookkeeping) and the signed
    /// token string (for the caller). Expiry is issuance time plus the
    /// configured refresh TTL.
    ///
    /// # Arguments
    /// * `subject` - User identifier
    ///
    /// # Errors
    /// * `SigningFailed` - Token could not be serialized or signed
    pub fn issue_refresh(&self, subject: &str) -> Result<IssuedRefresh, TokenError> {
        let token_id = Uuid::new_v4().to_string();
        let issued_at = Utc::now();
        let expires_at = issued_at + self.refresh_ttl;
        let claims = RefreshClaims {
            sub: subject.to_string(),
            jti: token_id.clone(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = self.encode(&claims)?;

        Ok(IssuedRefresh {
            token_id,
            token,
            issued_at,
            expires_at,
        })
    }

    /// Verify and decode an access token.
    ///
    /// The signature is checked before expiry, so a damaged token reports
    /// `Tampered` even when its embedded expiry has also passed.
    ///
    /// # Errors
    /// * `Tampered` - Signature mismatch or structural damage
    /// * `Expired` - Authentic token past its expiry
    pub fn verify_access(&self, token: &str) -> Result<AccessClaims, TokenError> {
        self.decode(token, self.validation())
    }

    /// Verify and decode a refresh token.
    ///
    /// # Errors
    /// * `Tampered` - Signature mismatch or structural damage
    /// * `Expired` - Authentic token past its expiry
    pub fn verify_refresh(&self, token: &str) -> Result<RefreshClaims, TokenError> {
        self.decode(token, self.validation())
    }

    /// Decode a refresh token, accepting one past its expiry.
    ///
    /// The signature is still verified; only the expiry check is skipped.
    /// Used to identify a naturally expired session so its registry entry
    /// can be dropped.
    ///
    /// # Errors
    /// * `Tampered` - Signature mismatch or structural damage
    pub fn decode_refresh_allow_expired(&self, token: &str) -> Result<RefreshClaims, TokenError> {
        let mut validation = self.validation();
        validation.validate_exp = false;

        self.decode(token, validation)
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(self.algorithm);
        // No clock slack: a token is expired the moment `exp` passes.
        validation.leeway = 0;
        validation
    }

    fn encode<T: Serialize>(&self, claims: &T) -> Result<String, TokenError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| TokenError::SigningFailed(e.to_string()))
    }

    fn decode<T: DeserializeOwned>(
        &self,
        token: &str,
        validation: Validation,
    ) -> Result<T, TokenError> {
        let token_data =
            decode::<T>(token, &self.decoding_key, &validation).map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Tampered,
            })?;

        Ok(token_data.claims)
    }
}
