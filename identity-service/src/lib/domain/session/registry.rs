use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::session::models::RefreshTokenId;
use crate::domain::session::models::SessionRecord;
use crate::domain::user::models::UserId;

/// Per-user map of live refresh tokens.
type SessionMap = Arc<RwLock<HashMap<RefreshTokenId, SessionRecord>>>;

/// Tracks which refresh tokens are currently honored, per user.
///
/// The registry is an allow-list, not a source of truth for expiry: expiry
/// lives in the signed token, and a record whose `expires_at` has passed is
/// treated as absent even while it still occupies memory (it is dropped the
/// next time a lookup touches it).
///
/// Locking is two-level. The outer map is only write-locked to create a
/// user's entry or to purge it wholesale, so steady-state traffic for one
/// user never serializes logins of unrelated users.
#[derive(Debug, Clone, Default)]
pub struct SessionRegistry {
    sessions: Arc<RwLock<HashMap<UserId, SessionMap>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a refresh token as valid for its user.
    ///
    /// Safe under concurrent calls for the same user; simultaneous logins
    /// both land in the set. An `add` racing [`revoke_all`] can only ever
    /// insert into the map `revoke_all` has already detached, which no
    /// lookup can reach — equivalent to having logged in just before the
    /// purge.
    pub async fn add(&self, record: SessionRecord) {
        let user_sessions = {
            let sessions = self.sessions.read().await;
            sessions.get(&record.user_id).cloned()
        };

        let user_sessions = match user_sessions {
            Some(user_sessions) => user_sessions,
            None => {
                let mut sessions = self.sessions.write().await;
                Arc::clone(sessions.entry(record.user_id).or_default())
            }
        };

        let mut records = user_sessions.write().await;
        tracing::debug!("Session {} added for user {}", record.token_id, record.user_id);
        records.insert(record.token_id.clone(), record);
    }

    /// Whether the token is currently honored for this user.
    ///
    /// O(1). A record past its embedded expiry counts as absent and is
    /// removed on the way out.
    pub async fn contains(&self, user_id: &UserId, token_id: &RefreshTokenId) -> bool {
        let user_sessions = {
            let sessions = self.sessions.read().await;
            match sessions.get(user_id) {
                Some(user_sessions) => Arc::clone(user_sessions),
                None => return false,
            }
        };

        let mut records = user_sessions.write().await;
        match records.get(token_id) {
            Some(record) if record.expires_at > Utc::now() => true,
            Some(_) => {
                records.remove(token_id);
                false
            }
            None => false,
        }
    }

    /// Remove one token. Removing an absent id is not an error.
    pub async fn revoke(&self, user_id: &UserId, token_id: &RefreshTokenId) {
        let user_sessions = {
            let sessions = self.sessions.read().await;
            sessions.get(user_id).cloned()
        };

        if let Some(user_sessions) = user_sessions {
            user_sessions.write().await.remove(token_id);
        }
    }

    /// Atomically clear every token for this user.
    ///
    /// The user's entry is removed from the outer map under the write lock,
    /// making it unreachable for every operation that starts afterwards;
    /// the detached map is then cleared so in-flight holders of it observe
    /// an empty set. Once this returns, no previously issued token for the
    /// user can pass [`contains`].
    pub async fn revoke_all(&self, user_id: &UserId) {
        let removed = self.sessions.write().await.remove(user_id);

        if let Some(user_sessions) = removed {
            user_sessions.write().await.clear();
            tracing::debug!("All sessions revoked for user {}", user_id);
        }
    }

    /// Number of live (unexpired) sessions for this user.
    pub async fn active_count(&self, user_id: &UserId) -> usize {
        let user_sessions = {
            let sessions = self.sessions.read().await;
            match sessions.get(user_id) {
                Some(user_sessions) => Arc::clone(user_sessions),
                None => return 0,
            }
        };

        let now = Utc::now();
        let records = user_sessions.read().await;
        records.values().filter(|r| r.expires_at > now).count()
    }
}
