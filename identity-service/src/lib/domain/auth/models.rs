use crate::domain::user::models::UserProfile;

/// Result of a successful login.
///
/// Carries the public profile and one token of each kind. The refresh
/// token's id is already recorded in the session registry when this value
/// is returned.
#[derive(Debug, Clone)]
pub struct AuthenticatedSession {
    /// Public profile of the authenticated account
    pub user: UserProfile,

    /// Short-lived, self-validating access token
    pub access_token: String,

    /// Long-lived refresh token, tracked in the session registry
    pub refresh_token: String,
}
