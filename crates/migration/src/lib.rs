//! # Warehouse Database Migrations
//!
//! Schema migrations and connection helpers for the warehouse backend.
//!
//! Every foreign key is created with `ON DELETE RESTRICT`; removing a parent row
//! before its children is rejected by the database.

pub use sea_orm_migration::prelude::*;

pub mod db;
pub mod migrator;

mod m20260301_000001_create_users_and_states;
mod m20260301_000002_create_hierarchy_tables;
mod m20260301_000003_create_stock_tables;
mod m20260301_000004_create_verification_tables;
mod m20260301_000005_create_operating_tables;

pub use db::{load_config_from_env, DatabaseConfig, SslMode};
pub use migrator::Migrator;

use ::error::AppError;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

/// Connected database handle shared by the CLI and the lifecycle engine.
#[derive(Debug, Clone)]
pub struct SeaDb {
    pub inner: DatabaseConnection,
}

impl SeaDb {
    /// Connect using configuration read from the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection fails.
    pub async fn new() -> Result<Self, AppError> { db::connect_from_env().await }

    /// Connect to a database URL with default pool options.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection fails.
    pub async fn from_connection_string(url: &str) -> Result<Self, AppError> {
        Self::connect_with(ConnectOptions::new(url.to_string())).await
    }

    /// Connect with explicit pool options.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection fails.
    pub async fn connect_with(options: ConnectOptions) -> Result<Self, AppError> {
        let inner = Database::connect(options)
            .await
            .map_err(|e| AppError::database(format!("Failed to connect to database: {}", e)))?;
        Ok(Self {
            inner,
        })
    }

    /// Apply all pending migrations.
    ///
    /// # Errors
    ///
    /// Returns an error if a migration fails.
    pub async fn migrate(&self) -> Result<(), AppError> {
        Migrator::up(&self.inner, None)
            .await
            .map_err(|e| AppError::migration(e.to_string()))
    }
}
