//! Admin account management commands.
//!
//! # Usage
//!
//! ```bash
//! # Promote an existing account to admin
//! agrilink-cli admin promote -e admin@example.com
//! ```
//!
//! Registration always creates plain users, so this is the only way an
//! account gains the admin role.

use chrono::Utc;
use serde_json::{Map, Value, json};

use agrilink_core::Role;
use agrilink_server::store::{DocumentStore, PgStore, collections, create_pool};

use super::{CliError, database_url};

/// Grant the admin role to the account registered under `email`.
///
/// If the account's profile document is missing (an orphaned identity from
/// a half-failed sign-up), the profile is recreated with the admin role.
///
/// # Errors
///
/// Returns `CliError::AccountNotFound` if no identity has this email, and
/// database/store errors otherwise.
pub async fn promote(email: &str) -> Result<(), CliError> {
    let database_url = database_url()?;

    tracing::info!("Connecting to database...");
    let pool = create_pool(&database_url).await?;
    let store = PgStore::new(pool);

    tracing::info!("Promoting account: {}", email);

    let identity = store
        .find_by_field(collections::IDENTITIES, "email", email)
        .await?
        .ok_or_else(|| CliError::AccountNotFound(email.to_owned()))?;

    let profile = store.get(collections::USERS, &identity.id).await?;

    match profile {
        Some(_) => {
            let patch = object(json!({ "role": Role::Admin.as_str() }));
            store
                .update(collections::USERS, &identity.id, patch)
                .await?;
            tracing::info!("Account promoted to admin: {}", email);
        }
        None => {
            // Orphaned identity: the sign-up created credentials but the
            // profile write never landed. Recreate it here.
            let profile = object(json!({
                "name": "",
                "email": email,
                "role": Role::Admin.as_str(),
                "createdAt": Utc::now(),
            }));
            store.put(collections::USERS, &identity.id, profile).await?;
            tracing::info!(
                "Profile was missing for {}; recreated it with the admin role",
                email
            );
        }
    }

    tracing::info!("The new role takes effect on the account's next request.");
    Ok(())
}

fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}
