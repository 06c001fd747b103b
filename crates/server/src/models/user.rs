//! Identity, user profile, and session types.
//!
//! An identity (credentials) and a user profile (name + role) are separate
//! documents that share an id, mirroring the identity-service /
//! profile-document split. The profile can be missing; a bare identity is
//! treated as a non-admin user everywhere.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use agrilink_core::{Role, UserId};

/// Login credentials stored in the `identities` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    /// Identity id (also the profile document id).
    pub id: UserId,
    /// Login email, unique within the collection.
    pub email: String,
    /// Argon2id password hash.
    pub password_hash: String,
    /// When the identity was created.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Profile document stored in the `users` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Profile id (= identity id).
    pub id: UserId,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Email as entered at sign-up.
    #[serde(default)]
    pub email: String,
    /// Role; absent in legacy documents means non-admin.
    #[serde(default)]
    pub role: Option<Role>,
    /// When the profile was created.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Minimal identity snapshot kept in the session cookie.
///
/// Only the auth routes write this; everything else reads it and re-resolves
/// the full [`CurrentUser`] from the store per request, so role changes take
/// effect without re-login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionIdentity {
    /// Identity id.
    pub id: UserId,
    /// Login email.
    pub email: String,
}

/// The resolved session published to views: identity fields merged with the
/// profile document when one exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// Identity id.
    pub id: UserId,
    /// Login email.
    pub email: String,
    /// Display name from the profile, if a profile exists.
    pub name: Option<String>,
    /// Role from the profile, if a profile exists and carries one.
    pub role: Option<Role>,
}

impl CurrentUser {
    /// True only when the published role strictly equals `admin`.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Some(Role::Admin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_with_role(role: Option<Role>) -> CurrentUser {
        CurrentUser {
            id: UserId::new("u-1"),
            email: "a@example.com".to_owned(),
            name: None,
            role,
        }
    }

    #[test]
    fn test_is_admin_requires_admin_role() {
        assert!(user_with_role(Some(Role::Admin)).is_admin());
        assert!(!user_with_role(Some(Role::User)).is_admin());
        // A bare identity (no profile, no role) is never an admin.
        assert!(!user_with_role(None).is_admin());
    }
}
