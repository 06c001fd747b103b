//! Database migration command.
//!
//! Runs the embedded migrations for the `documents` table. The sessions
//! table is owned by tower-sessions and migrated by the server at startup.

use agrilink_server::store::{MIGRATOR, create_pool};

use super::{CliError, database_url};

/// Run the document-table migrations.
///
/// # Errors
///
/// Returns `CliError` if the database URL is missing, the connection fails,
/// or a migration fails.
pub async fn run() -> Result<(), CliError> {
    let database_url = database_url()?;

    tracing::info!("Connecting to database...");
    let pool = create_pool(&database_url).await?;

    tracing::info!("Running migrations...");
    MIGRATOR.run(&pool).await?;

    tracing::info!("Migrations complete!");
    Ok(())
}
