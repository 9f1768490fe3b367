use std::borrow::Cow;
use std::collections::HashSet;
use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::domain::user::models::Role;
use crate::domain::user::models::User;

/// Capability identifier.
///
/// Capabilities are modeled as opaque strings (e.g. "reports.read").
/// The `"admin"` capability is a wildcard: holding it grants every other
/// capability without enumerating them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Capability(Cow<'static, str>);

impl Capability {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_wildcard(&self) -> bool {
        self.as_str() == "admin"
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Whether an account holds the given capability.
///
/// - No IO
/// - No panics
/// - No failure mode: absence of permission is a plain `false`
pub fn has_permission(user: &User, capability: &Capability) -> bool {
    grants(user.role, &user.permissions, capability)
}

/// Core policy check over a role and an explicit capability set.
///
/// An admin role or a wildcard entry in the set grants everything;
/// otherwise the capability must be an exact member.
pub fn grants(role: Role, permissions: &HashSet<Capability>, capability: &Capability) -> bool {
    if role.is_admin() {
        return true;
    }

    permissions.iter().any(Capability::is_wildcard) || permissions.contains(capability)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::user::models::EmailAddress;
    use crate::domain::user::models::UserId;
    use crate::domain::user::models::Username;

    fn user_with(role: Role, permissions: &[&'static str]) -> User {
        User {
            id: UserId::new(),
            username: Username::new("alice".to_string()).unwrap(),
            email: EmailAddress::new("a@example.com".to_string()).unwrap(),
            password_hash: "$argon2id$test_hash".to_string(),
            role,
            permissions: permissions.iter().map(|p| Capability::new(*p)).collect(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_explicit_capability() {
        let user = user_with(Role::User, &["reports.read"]);

        assert!(has_permission(&user, &Capability::new("reports.read")));
        assert!(!has_permission(&user, &Capability::new("reports.write")));
    }

    #[test]
    fn test_empty_set_grants_nothing() {
        let user = user_with(Role::User, &[]);

        assert!(!has_permission(&user, &Capability::new("reports.read")));
    }

    #[test]
    fn test_admin_role_grants_everything() {
        let user = user_with(Role::Admin, &[]);

        assert!(has_permission(&user, &Capability::new("reports.read")));
        assert!(has_permission(&user, &Capability::new("never.listed")));
    }

    #[test]
    fn test_wildcard_capability_grants_everything() {
        let user = user_with(Role::User, &["admin"]);

        assert!(has_permission(&user, &Capability::new("reports.read")));
        assert!(has_permission(&user, &Capability::new("never.listed")));
        assert!(has_permission(&user, &Capability::new("admin")));
    }

    #[test]
    fn test_profile_mirrors_user() {
        let user = user_with(Role::User, &["reports.read"]);
        let profile = user.profile();

        assert!(profile.has_permission(&Capability::new("reports.read")));
        assert!(!profile.has_permission(&Capability::new("reports.write")));
    }
}
