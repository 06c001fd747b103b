//! User roles.

use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Role assigned to a user profile.
///
/// New sign-ups always receive [`Role::User`]; promotion to [`Role::Admin`]
/// happens only through the CLI, never through the application itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Regular user: can browse and filter the catalog.
    #[default]
    User,
    /// Administrator: can also manage soil and distributor records.
    Admin,
}

impl Role {
    /// String representation, matching the stored document value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown role string.
#[derive(Debug, thiserror::Error)]
#[error("unknown role: {0}. Valid roles: user, admin")]
pub struct ParseRoleError(String);

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            other => Err(ParseRoleError(other.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Admin).expect("ser"), "\"admin\"");
        let role: Role = serde_json::from_str("\"user\"").expect("de");
        assert_eq!(role, Role::User);
    }

    #[test]
    fn test_role_from_str() {
        assert_eq!("admin".parse::<Role>().expect("parse"), Role::Admin);
        assert!("superuser".parse::<Role>().is_err());
    }

    #[test]
    fn test_default_is_user() {
        assert_eq!(Role::default(), Role::User);
    }
}
