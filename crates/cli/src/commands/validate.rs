//! # CLI Validate Command
//!
//! Checks the database configuration and the deletion strategy wiring.

use std::sync::Arc;

use error::{AppError, Result, ResultExt};
use lifecycle::{AggregateKind, DeletionMode, EntityKind, SeaStore, StrategyResolver};
use migration::DatabaseConfig;
use sea_orm::DatabaseConnection;
use tracing::{debug, info};

use crate::{commands::ValidateArgs, config::redact};

/// Validates configuration, optionally pinging the database
///
/// # Errors
///
/// `Config` when the configuration or the strategy table is incomplete, `Database` when the ping fails.
pub async fn validate(config: &DatabaseConfig, args: ValidateArgs) -> Result<()> {
    check_pool(config)?;

    let resolver = StrategyResolver::new(Arc::new(SeaStore::new(DatabaseConnection::Disconnected)));
    check_wiring(&resolver)?;
    for (kind, mode) in resolver.registered() {
        debug!(target: "validate", entity = %kind, mode = %mode, "Strategy registered");
    }
    info!(
        target: "validate",
        strategies = resolver.registered().len(),
        "Deletion strategy wiring is complete"
    );

    if args.connect {
        let url = redact(&config.build_connection_string());
        info!(target: "validate", database = %url, "Pinging database...");
        let db = config.connect().await?;
        db.inner
            .ping()
            .await
            .with_context(|| format!("Failed to ping {}", url))?;
        info!(target: "validate", "Database reachable");
    }

    println!("Configuration is valid");
    Ok(())
}

fn check_pool(config: &DatabaseConfig) -> Result<()> {
    if config.pool_size == 0 {
        return Err(AppError::config("WAREHOUSE_DATABASE_POOL_SIZE must be at least 1"));
    }
    if config.connect_timeout == 0 {
        return Err(AppError::config("WAREHOUSE_DATABASE_CONNECT_TIMEOUT must be at least 1"));
    }
    Ok(())
}

/// Every aggregate must cascade and every entity must support logical deletion.
fn check_wiring(resolver: &StrategyResolver) -> Result<()> {
    let mut missing = Vec::new();
    for aggregate in [AggregateKind::Company, AggregateKind::Branch, AggregateKind::Zone] {
        match resolver.resolve(aggregate.entity(), DeletionMode::Cascade) {
            Ok(strategy) if strategy.as_cascade().is_some() => {},
            _ => missing.push(format!("{}/{}", aggregate, DeletionMode::Cascade)),
        }
    }
    for kind in EntityKind::ALL {
        if resolver.resolve(kind, DeletionMode::Logical).is_err() {
            missing.push(format!("{}/{}", kind, DeletionMode::Logical));
        }
    }

    if missing.is_empty() {
        Ok(())
    }
    else {
        Err(AppError::config(format!(
            "Missing deletion strategies: {}",
            missing.join(", ")
        )))
    }
}
