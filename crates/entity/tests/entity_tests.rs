//! Schema-shape tests for the entity crate
//! These only build SQL; no database connection is required.

use sea_orm::{DbBackend, EntityName, EntityTrait, ModelTrait, QueryFilter, QueryTrait, ColumnTrait};

/// Every entity maps to the table created by the migration crate
#[test]
fn test_table_names() {
    assert_eq!(entity::Companies.table_name(), "companies");
    assert_eq!(entity::Branches.table_name(), "branches");
    assert_eq!(entity::Zones.table_name(), "zones");
    assert_eq!(entity::Items.table_name(), "items");
    assert_eq!(entity::Inventories.table_name(), "inventories");
    assert_eq!(entity::InventoryDetails.table_name(), "inventory_details");
    assert_eq!(entity::Verifications.table_name(), "verifications");
    assert_eq!(entity::Checkers.table_name(), "checkers");
    assert_eq!(entity::Users.table_name(), "users");
    assert_eq!(entity::Operatings.table_name(), "operatings");
    assert_eq!(entity::OperatingGroups.table_name(), "operating_groups");
    assert_eq!(entity::States.table_name(), "states");
}

/// Walking from a zone to its items goes through the zone_id foreign key
#[test]
fn test_zone_items_relation() {
    let zone = entity::zones::Model {
        id:         5,
        branch_id:  1,
        name:       "Cold storage".to_string(),
        user_id:    None,
        active:     true,
        created_at: chrono::Utc::now(),
    };

    let sql = zone
        .find_related(entity::Items)
        .build(DbBackend::Sqlite)
        .to_string();

    assert!(sql.contains(r#""items"."zone_id""#), "unexpected sql: {sql}");
}

/// Branch-scoped filters render against the right column
#[test]
fn test_checker_filter_by_branch() {
    let sql = entity::Checkers::find()
        .filter(entity::checkers::Column::BranchId.is_in([3, 4]))
        .build(DbBackend::Postgres)
        .to_string();

    assert!(sql.contains(r#""checkers"."branch_id" IN (3, 4)"#), "unexpected sql: {sql}");
}
