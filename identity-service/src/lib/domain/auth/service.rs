use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Duration;
use chrono::Utc;

use auth::PasswordHasher;
use auth::TokenCodec;
use auth::TokenError;

use crate::config::AuthConfig;
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::AuthenticatedSession;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::auth::ports::UserRepository;
use crate::domain::session::models::RefreshTokenId;
use crate::domain::session::models::SessionRecord;
use crate::domain::session::registry::SessionRegistry;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::Role;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserProfile;
use crate::domain::user::models::Username;

/// Domain service implementation for authentication and session lifecycle.
///
/// Concrete implementation of AuthServicePort with dependency injection.
/// Password hashing runs without holding any shared lock; the session
/// registry synchronizes internally.
pub struct AuthService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    password_hasher: PasswordHasher,
    token_codec: TokenCodec,
    sessions: SessionRegistry,
}

impl<UR> AuthService<UR>
where
    UR: UserRepository,
{
    /// Create a new authentication service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `password_hasher` - Configured password hasher
    /// * `token_codec` - Configured token codec
    /// * `sessions` - Session registry (clone a handle to share it)
    pub fn new(
        repository: Arc<UR>,
        password_hasher: PasswordHasher,
        token_codec: TokenCodec,
        sessions: SessionRegistry,
    ) -> Self {
        Self {
            repository,
            password_hasher,
            token_codec,
            sessions,
        }
    }

    /// Wire a service from configuration.
    ///
    /// # Errors
    /// * `Hashing` - The configured work factor was rejected
    pub fn from_config(repository: Arc<UR>, config: &AuthConfig) -> Result<Self, AuthError> {
        let password_hasher = PasswordHasher::with_work_factor(config.password_work_factor)?;
        let token_codec = TokenCodec::new(
            config.signing_secret.as_bytes(),
            Duration::seconds(config.access_token_ttl_secs),
            Duration::seconds(config.refresh_token_ttl_secs),
        );

        Ok(Self::new(
            repository,
            password_hasher,
            token_codec,
            SessionRegistry::new(),
        ))
    }

    /// Handle to the session registry backing this service.
    pub fn sessions(&self) -> &SessionRegistry {
        &self.sessions
    }

    /// Mint an access token carrying the account's current role and
    /// permission snapshot.
    fn access_token_for(&self, user: &User) -> Result<String, AuthError> {
        let permissions = user
            .permissions
            .iter()
            .map(|capability| capability.as_str().to_string())
            .collect();

        self.token_codec
            .issue_access(&user.id.to_string(), user.role.as_str(), permissions)
            .map_err(AuthError::from)
    }

    /// Drop the registry entry of a naturally expired refresh token.
    ///
    /// Signature is still enforced; an expired forgery identifies nothing.
    async fn drop_expired_session(&self, refresh_token: &str) {
        if let Ok(stale) = self.token_codec.decode_refresh_allow_expired(refresh_token) {
            if let Ok(user_id) = UserId::from_string(&stale.sub) {
                self.sessions
                    .revoke(&user_id, &RefreshTokenId::new(stale.jti))
                    .await;
            }
        }
    }
}

#[async_trait]
impl<UR> AuthServicePort for AuthService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, command: RegisterUserCommand) -> Result<UserProfile, AuthError> {
        if self
            .repository
            .find_by_username(&command.username)
            .await?
            .is_some()
        {
            return Err(AuthError::UsernameAlreadyExists(
                command.username.to_string(),
            ));
        }

        if self
            .repository
            .find_by_email(&command.email)
            .await?
            .is_some()
        {
            return Err(AuthError::EmailAlreadyExists(
                command.email.as_str().to_string(),
            ));
        }

        let password_hash = self.password_hasher.hash(&command.password)?;

        let user = User {
            id: UserId::new(),
            username: command.username,
            email: command.email,
            password_hash,
            role: Role::User,
            permissions: HashSet::new(),
            created_at: Utc::now(),
        };

        let created = self.repository.insert(user).await?;
        tracing::info!("Registered user {} ({})", created.username, created.id);

        Ok(created.profile())
    }

    async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<AuthenticatedSession, AuthError> {
        // Anything that cannot name a stored account gets the same answer as
        // a wrong password, so callers cannot probe which usernames exist.
        let username = match Username::new(username.to_string()) {
            Ok(username) => username,
            Err(_) => return Err(AuthError::InvalidCredentials),
        };

        let user = match self.repository.find_by_username(&username).await? {
            Some(user) => user,
            None => {
                tracing::warn!("Login failed for unknown username {}", username);
                return Err(AuthError::InvalidCredentials);
            }
        };

        let verified = match self.password_hasher.verify(password, &user.password_hash) {
            Ok(verified) => verified,
            Err(e) => {
                // Corrupted stored record, not bad input.
                tracing::error!("Unreadable password hash for user {}: {}", user.id, e);
                return Err(AuthError::InvalidCredentials);
            }
        };

        if !verified {
            tracing::warn!("Login failed for username {}: password mismatch", username);
            return Err(AuthError::InvalidCredentials);
        }

        let access_token = self.access_token_for(&user)?;
        let issued = self.token_codec.issue_refresh(&user.id.to_string())?;

        self.sessions
            .add(SessionRecord::new(
                RefreshTokenId::new(issued.token_id),
                user.id,
                issued.issued_at,
                issued.expires_at,
            ))
            .await;

        tracing::info!("User {} authenticated", user.id);

        Ok(AuthenticatedSession {
            user: user.profile(),
            access_token,
            refresh_token: issued.token,
        })
    }

    async fn refresh(&self, refresh_token: &str) -> Result<String, AuthError> {
        let claims = match self.token_codec.verify_refresh(refresh_token) {
            Ok(claims) => claims,
            Err(TokenError::Expired) => {
                self.drop_expired_session(refresh_token).await;
                return Err(AuthError::TokenExpired);
            }
            Err(TokenError::Tampered) => {
                tracing::warn!("Refresh rejected: token failed signature validation");
                return Err(AuthError::TokenTampered);
            }
            Err(e) => return Err(e.into()),
        };

        // Authentic token whose subject is not one of our ids cannot be in
        // the registry either.
        let user_id = match UserId::from_string(&claims.sub) {
            Ok(user_id) => user_id,
            Err(_) => return Err(AuthError::TokenNotRegistered),
        };
        let token_id = RefreshTokenId::new(claims.jti);

        if !self.sessions.contains(&user_id, &token_id).await {
            return Err(AuthError::TokenNotRegistered);
        }

        let user = match self.repository.find_by_id(&user_id).await? {
            Some(user) => user,
            None => {
                tracing::warn!("Registered refresh token for missing user {}", user_id);
                return Err(AuthError::TokenNotRegistered);
            }
        };

        // The refresh token itself is not rotated; it stays registered until
        // logout, password change, or natural expiry.
        self.access_token_for(&user)
    }

    async fn logout(&self, refresh_token: &str) -> Result<(), AuthError> {
        let claims = match self.token_codec.verify_refresh(refresh_token) {
            Ok(claims) => claims,
            Err(TokenError::Expired) => {
                // Already unusable; just drop the stale registry entry.
                self.drop_expired_session(refresh_token).await;
                return Ok(());
            }
            Err(TokenError::Tampered) => {
                tracing::warn!("Logout received a token that failed signature validation");
                return Ok(());
            }
            Err(_) => return Ok(()),
        };

        if let Ok(user_id) = UserId::from_string(&claims.sub) {
            self.sessions
                .revoke(&user_id, &RefreshTokenId::new(claims.jti))
                .await;
            tracing::info!("User {} logged out", user_id);
        }

        Ok(())
    }

    async fn change_password(
        &self,
        user_id: &UserId,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AuthError> {
        let user = self
            .repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AuthError::NotFound(user_id.to_string()))?;

        let verified = match self
            .password_hasher
            .verify(current_password, &user.password_hash)
        {
            Ok(verified) => verified,
            Err(e) => {
                tracing::error!("Unreadable password hash for user {}: {}", user.id, e);
                return Err(AuthError::InvalidCurrentPassword);
            }
        };

        if !verified {
            return Err(AuthError::InvalidCurrentPassword);
        }

        let password_hash = self.password_hasher.hash(new_password)?;
        self.repository
            .update_password_hash(user_id, password_hash)
            .await?;

        // Every outstanding refresh token dies with the old password; the
        // purge completes before this call returns.
        self.sessions.revoke_all(user_id).await;
        tracing::info!("Password changed for user {}; all sessions revoked", user_id);

        Ok(())
    }
}
