//! CLI command implementations.

pub mod admin;
pub mod migrate;
pub mod seed;

use secrecy::SecretString;
use thiserror::Error;

/// Errors shared by the CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database connection error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration error.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Document store error.
    #[error("Store error: {0}")]
    Store(#[from] agrilink_server::store::StoreError),

    /// No account registered with the given email.
    #[error("No account found for email: {0}")]
    AccountNotFound(String),
}

/// Read the database URL, preferring `AGRILINK_DATABASE_URL` and falling
/// back to `DATABASE_URL`.
pub(crate) fn database_url() -> Result<SecretString, CliError> {
    dotenvy::dotenv().ok();

    std::env::var("AGRILINK_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| CliError::MissingEnvVar("AGRILINK_DATABASE_URL"))
}
