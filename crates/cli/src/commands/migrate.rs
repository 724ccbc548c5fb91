//! # CLI Migration Command
//!
//! Database migration handling for the warehouse CLI.

use error::{AppError, Result};
use migration::{DatabaseConfig, MigratorTrait as _};
use tracing::info;

use crate::commands::MigrateArgs;

/// Runs, lists or rolls back database migrations
///
/// # Errors
///
/// Returns an error if the connection or a migration fails.
pub async fn migrate(config: &DatabaseConfig, args: MigrateArgs) -> Result<()> {
    info!(
        target: "migrate",
        dry_run = %args.dry_run,
        rollback = %args.rollback,
        "Running database migrations..."
    );

    let db = config.connect().await?;

    if args.dry_run {
        let pending = migration::Migrator::get_pending_migrations(&db.inner)
            .await
            .map_err(|e| AppError::migration(format!("Failed to get pending migrations: {}", e)))?;

        info!(target: "migrate", pending_count = %pending.len(), "Pending migrations found");
        for m in &pending {
            println!("{}", m.name());
        }
        return Ok(());
    }

    if args.rollback {
        info!(target: "migrate", "Rolling back the last migration...");
        migration::Migrator::down(&db.inner, Some(1))
            .await
            .map_err(|e| AppError::migration(format!("Failed to rollback migration: {}", e)))?;
        info!(target: "migrate", "Rollback completed successfully");
        return Ok(());
    }

    db.migrate().await?;
    info!(target: "migrate", "Migrations completed successfully");
    Ok(())
}
