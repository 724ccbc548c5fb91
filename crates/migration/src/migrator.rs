//! # Database Migrator
//!
//! This module implements the Sea-ORM migrator trait for managing database schema changes.
//! The migrator coordinates all migration operations and maintains the migration history.

use sea_orm_migration::prelude::*;

use crate::{
    m20260301_000001_create_users_and_states,
    m20260301_000002_create_hierarchy_tables,
    m20260301_000003_create_stock_tables,
    m20260301_000004_create_verification_tables,
    m20260301_000005_create_operating_tables,
};

/// The main migrator that coordinates all migration operations
///
/// # Example
///
/// ```rust,ignore
/// use migration::{Migrator, MigratorTrait};
///
/// Migrator::up(&db, None).await?;
/// ```
#[derive(Debug)]
pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    /// Migrations are executed in the order they appear in this list;
    /// each table is created after every table it references.
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_create_users_and_states::Migration),
            Box::new(m20260301_000002_create_hierarchy_tables::Migration),
            Box::new(m20260301_000003_create_stock_tables::Migration),
            Box::new(m20260301_000004_create_verification_tables::Migration),
            Box::new(m20260301_000005_create_operating_tables::Migration),
        ]
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::{ConnectionTrait, Database};

    use super::*;

    #[test]
    fn test_migrations_are_ordered() {
        let names: Vec<String> = Migrator::migrations()
            .iter()
            .map(|m| m.name().to_string())
            .collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
        assert_eq!(names.len(), 5);
    }

    #[tokio::test]
    async fn test_up_and_down_on_sqlite() {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to connect to test database");

        Migrator::up(&db, None).await.expect("migrations should apply");
        let manager = SchemaManager::new(&db);
        for table in [
            "users",
            "states",
            "companies",
            "branches",
            "zones",
            "items",
            "inventories",
            "inventory_details",
            "checkers",
            "verifications",
            "operatings",
            "operating_groups",
        ] {
            assert!(manager.has_table(table).await.unwrap(), "missing table {table}");
        }

        Migrator::down(&db, None).await.expect("migrations should roll back");
        assert!(!manager.has_table("companies").await.unwrap());
        assert_eq!(db.get_database_backend(), sea_orm::DbBackend::Sqlite);
    }
}
