//! Authentication service.
//!
//! Owns sign-up, login, and session resolution against two collections:
//! `identities` (email + Argon2id hash) and `users` (profile documents).
//! The two documents share an id; the profile can be missing, in which case
//! the bare identity is published with no role and is non-admin everywhere.

mod error;

pub use error::AuthError;

use std::sync::Arc;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::Utc;
use serde_json::{Map, Value, json};

use agrilink_core::{Email, Role, UserId};

use crate::models::{CurrentUser, Identity, SessionIdentity, UserProfile, decode_document};
use crate::store::{DocumentStore, collections};

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Authentication service.
pub struct AuthService {
    store: Arc<dyn DocumentStore>,
}

impl AuthService {
    /// Create a new authentication service.
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Register a new user: create the identity, then the profile document
    /// with role fixed to `user`.
    ///
    /// If the profile write fails after the identity was created, the
    /// identity is not rolled back; the orphan is logged and the error
    /// propagated. `agrilink-cli admin promote` can repair the profile.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` if the email format is invalid.
    /// Returns `AuthError::WeakPassword` if the password is too short.
    /// Returns `AuthError::UserAlreadyExists` if the email is registered.
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<CurrentUser, AuthError> {
        let email = Email::parse(email)?;
        validate_password(password)?;

        tracing::info!(email = %email, "attempting to sign up user");

        let existing = self
            .store
            .find_by_field(collections::IDENTITIES, "email", email.as_str())
            .await?;
        if existing.is_some() {
            return Err(AuthError::UserAlreadyExists);
        }

        let password_hash = hash_password(password)?;
        let now = Utc::now();

        let identity = object(json!({
            "email": email.as_str(),
            "passwordHash": password_hash,
            "createdAt": now,
        }));
        let id = self.store.insert(collections::IDENTITIES, identity).await?;

        let profile = object(json!({
            "name": name,
            "email": email.as_str(),
            "role": Role::User.as_str(),
            "createdAt": now,
        }));
        if let Err(error) = self.store.put(collections::USERS, &id, profile).await {
            tracing::warn!(
                %id,
                %error,
                "profile write failed after identity creation; identity left orphaned"
            );
            return Err(error.into());
        }

        tracing::info!(%id, "user signed up successfully");

        Ok(CurrentUser {
            id: UserId::new(id),
            email: email.as_str().to_owned(),
            name: Some(name.to_owned()),
            role: Some(Role::User),
        })
    }

    /// Login with email and password, returning the resolved session.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the email is unknown or
    /// the password is wrong.
    pub async fn log_in(&self, email: &str, password: &str) -> Result<CurrentUser, AuthError> {
        let email = Email::parse(email)?;

        tracing::info!(email = %email, "attempting to login user");

        let doc = self
            .store
            .find_by_field(collections::IDENTITIES, "email", email.as_str())
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let identity: Identity =
            decode_document(doc).map_err(|_| AuthError::InvalidCredentials)?;

        verify_password(password, &identity.password_hash)?;

        tracing::info!(id = %identity.id, "user logged in successfully");

        let session = SessionIdentity {
            id: identity.id,
            email: identity.email,
        };
        Ok(self.resolve_session(&session).await)
    }

    /// Resolve the published session for an identity: fetch the profile
    /// document and merge it over the identity fields.
    ///
    /// Runs on every authenticated request, so role changes take effect
    /// without re-login. Never fails: a missing profile, or any store
    /// failure while fetching it, publishes the bare identity (no role,
    /// non-admin) — the browse views must stay usable either way.
    pub async fn resolve_session(&self, identity: &SessionIdentity) -> CurrentUser {
        let bare = CurrentUser {
            id: identity.id.clone(),
            email: identity.email.clone(),
            name: None,
            role: None,
        };

        let doc = match self.store.get(collections::USERS, identity.id.as_str()).await {
            Ok(Some(doc)) => doc,
            Ok(None) => return bare,
            Err(error) => {
                tracing::error!(id = %identity.id, %error, "failed to fetch user profile");
                return bare;
            }
        };

        match decode_document::<UserProfile>(doc) {
            Ok(profile) => CurrentUser {
                id: identity.id.clone(),
                email: if profile.email.is_empty() {
                    identity.email.clone()
                } else {
                    profile.email
                },
                name: Some(profile.name),
                role: profile.role,
            },
            Err(error) => {
                tracing::error!(id = %identity.id, %error, "failed to decode user profile");
                bare
            }
        }
    }

    /// Log the logout; session teardown itself happens at the route layer.
    pub fn log_out(&self, identity: &SessionIdentity) {
        tracing::info!(id = %identity.id, "user logging out");
    }
}

fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        // json!({...}) literals above are always objects.
        _ => Map::new(),
    }
}

/// Validate password meets requirements.
fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }

    Ok(())
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn service() -> (Arc<MemoryStore>, AuthService) {
        let store = Arc::new(MemoryStore::new());
        let auth = AuthService::new(store.clone());
        (store, auth)
    }

    #[tokio::test]
    async fn test_sign_up_defaults_to_user_role() {
        let (store, auth) = service();

        let user = auth
            .sign_up("farmer@example.com", "growing-season", "Amina")
            .await
            .expect("sign up");

        assert_eq!(user.role, Some(Role::User));
        assert!(!user.is_admin());
        assert_eq!(store.len(collections::IDENTITIES).await, 1);
        assert_eq!(store.len(collections::USERS).await, 1);
    }

    #[tokio::test]
    async fn test_sign_up_duplicate_email_rejected() {
        let (_, auth) = service();
        auth.sign_up("farmer@example.com", "growing-season", "Amina")
            .await
            .expect("first sign up");

        let err = auth
            .sign_up("farmer@example.com", "other-password", "Imposter")
            .await
            .expect_err("duplicate");
        assert!(matches!(err, AuthError::UserAlreadyExists));
    }

    #[tokio::test]
    async fn test_sign_up_rejects_weak_password_and_bad_email() {
        let (_, auth) = service();
        assert!(matches!(
            auth.sign_up("farmer@example.com", "short", "Amina").await,
            Err(AuthError::WeakPassword(_))
        ));
        assert!(matches!(
            auth.sign_up("not-an-email", "growing-season", "Amina").await,
            Err(AuthError::InvalidEmail(_))
        ));
    }

    #[tokio::test]
    async fn test_log_in_merges_profile() {
        let (_, auth) = service();
        auth.sign_up("farmer@example.com", "growing-season", "Amina")
            .await
            .expect("sign up");

        let user = auth
            .log_in("farmer@example.com", "growing-season")
            .await
            .expect("login");

        assert_eq!(user.name.as_deref(), Some("Amina"));
        assert_eq!(user.role, Some(Role::User));
    }

    #[tokio::test]
    async fn test_log_in_wrong_password_or_unknown_email() {
        let (_, auth) = service();
        auth.sign_up("farmer@example.com", "growing-season", "Amina")
            .await
            .expect("sign up");

        assert!(matches!(
            auth.log_in("farmer@example.com", "wrong-password").await,
            Err(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            auth.log_in("stranger@example.com", "growing-season").await,
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_resolve_session_without_profile_is_bare_identity() {
        let (_, auth) = service();
        let session = SessionIdentity {
            id: UserId::new("ghost"),
            email: "ghost@example.com".to_owned(),
        };

        let user = auth.resolve_session(&session).await;
        assert_eq!(user.email, "ghost@example.com");
        assert!(user.name.is_none());
        assert!(user.role.is_none());
        assert!(!user.is_admin());
    }

    #[tokio::test]
    async fn test_role_change_visible_on_next_resolve() {
        let (store, auth) = service();
        let user = auth
            .sign_up("admin@example.com", "growing-season", "Kofi")
            .await
            .expect("sign up");

        let session = SessionIdentity {
            id: user.id.clone(),
            email: user.email.clone(),
        };
        assert!(!auth.resolve_session(&session).await.is_admin());

        // Promote out-of-band, the way the CLI does.
        let patch = object(json!({"role": "admin"}));
        store
            .update(collections::USERS, user.id.as_str(), patch)
            .await
            .expect("promote");

        assert!(auth.resolve_session(&session).await.is_admin());
    }
}
