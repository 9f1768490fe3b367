use async_trait::async_trait;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::AuthenticatedSession;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserProfile;
use crate::domain::user::models::Username;

/// Port for authentication and session lifecycle operations.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new account.
    ///
    /// # Arguments
    /// * `command` - Validated command containing username, email, and password
    ///
    /// # Returns
    /// Public profile of the created account (never the password hash)
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `Storage` - Repository operation failed
    async fn register(&self, command: RegisterUserCommand) -> Result<UserProfile, AuthError>;

    /// Verify credentials and open a session.
    ///
    /// On success the refresh token's id is recorded in the session
    /// registry before the pair is returned.
    ///
    /// # Arguments
    /// * `username` - Raw username as supplied by the caller
    /// * `password` - Plaintext password
    ///
    /// # Returns
    /// Profile plus an access/refresh token pair
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown username or wrong password; the two
    ///   are indistinguishable to the caller
    /// * `Storage` - Repository operation failed
    async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<AuthenticatedSession, AuthError>;

    /// Exchange a live refresh token for a new access token.
    ///
    /// The refresh token is not rotated: it stays valid until logout,
    /// password change, or natural expiry.
    ///
    /// # Arguments
    /// * `refresh_token` - Signed refresh token string
    ///
    /// # Returns
    /// Newly signed access token
    ///
    /// # Errors
    /// * `TokenTampered` - Signature mismatch
    /// * `TokenExpired` - Authentic token past its expiry
    /// * `TokenNotRegistered` - Authentic token that was revoked or never recorded
    async fn refresh(&self, refresh_token: &str) -> Result<String, AuthError>;

    /// Revoke one refresh token.
    ///
    /// Idempotent: a token that is tampered, expired, or already revoked is
    /// treated as logged out and the call succeeds.
    ///
    /// # Arguments
    /// * `refresh_token` - Signed refresh token string
    async fn logout(&self, refresh_token: &str) -> Result<(), AuthError>;

    /// Replace the account password and revoke every outstanding session.
    ///
    /// Once this returns success, no refresh token issued before the change
    /// is honored again.
    ///
    /// # Arguments
    /// * `user_id` - Account to update
    /// * `current_password` - Must verify against the stored hash
    /// * `new_password` - Replacement plaintext password
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `InvalidCurrentPassword` - Current password does not verify
    /// * `Storage` - Repository operation failed
    async fn change_password(
        &self,
        user_id: &UserId,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AuthError>;
}

/// Persistence operations for user accounts.
///
/// The core never assumes a particular storage technology; anything that
/// honors these contracts can sit behind the service.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist a new account.
    ///
    /// # Arguments
    /// * `user` - User entity to create
    ///
    /// # Returns
    /// Created user entity
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `Storage` - Storage operation failed
    async fn insert(&self, user: User) -> Result<User, AuthError>;

    /// Retrieve an account by identifier.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `Storage` - Storage operation failed
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, AuthError>;

    /// Retrieve an account by username.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `Storage` - Storage operation failed
    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, AuthError>;

    /// Retrieve an account by email address.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `Storage` - Storage operation failed
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, AuthError>;

    /// Replace the stored password hash.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `Storage` - Storage operation failed
    async fn update_password_hash(
        &self,
        id: &UserId,
        password_hash: String,
    ) -> Result<(), AuthError>;
}
