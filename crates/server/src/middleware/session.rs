//! Session middleware configuration.
//!
//! Sets up `PostgreSQL`-backed sessions using tower-sessions, with signed
//! cookies derived from the configured session secret.

use cookie::Key;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use tower_sessions::{Expiry, SessionManagerLayer, service::SignedCookie};
use tower_sessions_sqlx_store::PostgresStore;

use crate::config::AppConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "agrilink_session";

/// Session expiry time in seconds (7 days).
const SESSION_EXPIRY_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Create the session layer with `PostgreSQL` store.
///
/// The sessions table is created by `PostgresStore::migrate`, which the
/// server runs at startup. The signing key is derived from the session
/// secret, so config validation (minimum length, no placeholder values)
/// is the only constraint on the secret itself.
#[must_use]
pub fn create_session_layer(
    pool: &PgPool,
    config: &AppConfig,
) -> SessionManagerLayer<PostgresStore, SignedCookie> {
    let store = PostgresStore::new(pool.clone());

    let key = Key::derive_from(config.session_secret.expose_secret().as_bytes());

    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
        .with_signed(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signing_key_derives_from_minimum_length_secret() {
        // Config guarantees at least 32 characters; derivation must accept
        // that length rather than requiring a full 64-byte master key.
        let secret = "0123456789abcdef0123456789abcdef";
        let key = Key::derive_from(secret.as_bytes());
        assert!(!key.signing().is_empty());

        let again = Key::derive_from(secret.as_bytes());
        assert_eq!(key.signing(), again.signing());
    }
}
