//! # Strategy Tests
//!
//! Logical and permanent deletes, and resolver routing through the service.

mod common;

use common::*;
use entity::{inventory_details, items, users};
use lifecycle::{DeletionMode, EntityKind, LifecycleService};
use sea_orm::EntityTrait;

#[tokio::test]
async fn test_logical_delete_flips_active_flag() {
    let db = setup_db().await;
    let s = scenario(&db).await;
    let service = LifecycleService::from_connection(db.clone());

    assert!(service
        .delete(EntityKind::Item, s.item, DeletionMode::Logical, None)
        .await
        .unwrap());

    let item = items::Entity::find_by_id(s.item)
        .one(&db)
        .await
        .unwrap()
        .expect("logical delete keeps the row");
    assert!(!item.active);

    // Second call finds the row already inactive.
    assert!(!service
        .delete(EntityKind::Item, s.item, DeletionMode::Logical, None)
        .await
        .unwrap());
}

#[tokio::test]
async fn test_logical_delete_of_missing_row_returns_false() {
    let db = setup_db().await;
    let service = LifecycleService::from_connection(db);

    assert!(!service
        .delete(EntityKind::Zone, 42, DeletionMode::Logical, None)
        .await
        .unwrap());
}

#[tokio::test]
async fn test_logical_delete_of_user_by_another_user() {
    let db = setup_db().await;
    let s = scenario(&db).await;
    let service = LifecycleService::from_connection(db.clone());

    let err = service
        .delete(EntityKind::User, s.u1, DeletionMode::Logical, Some(s.u1))
        .await
        .unwrap_err();
    assert_eq!(err.code(), "BAD_REQUEST");
    assert!(user_active(&db, s.u1).await);

    assert!(service
        .delete(EntityKind::User, s.u1, DeletionMode::Logical, Some(s.u3))
        .await
        .unwrap());
    let u1 = users::Entity::find_by_id(s.u1)
        .one(&db)
        .await
        .unwrap()
        .expect("users are never hard-deleted");
    assert!(!u1.active);
}

#[tokio::test]
async fn test_permanent_delete_removes_leaf_row() {
    let db = setup_db().await;
    let s = scenario(&db).await;
    let service = LifecycleService::from_connection(db.clone());

    assert!(service
        .delete(EntityKind::InventoryDetail, s.detail, DeletionMode::Permanent, None)
        .await
        .unwrap());
    assert!(inventory_details::Entity::find_by_id(s.detail)
        .one(&db)
        .await
        .unwrap()
        .is_none());

    assert!(!service
        .delete(EntityKind::InventoryDetail, s.detail, DeletionMode::Permanent, None)
        .await
        .unwrap());
}

#[tokio::test]
async fn test_permanent_delete_with_dependents_names_the_relation() {
    let db = setup_db().await;
    let s = scenario(&db).await;
    let service = LifecycleService::from_connection(db.clone());

    let err = service
        .delete(EntityKind::Item, s.item, DeletionMode::Permanent, None)
        .await
        .unwrap_err();
    assert_eq!(err.code(), "CONFLICT");
    assert!(!err.is_retryable());
    assert!(err.message().contains("inventory_details.item_id"), "{}", err);

    assert!(items::Entity::find_by_id(s.item)
        .one(&db)
        .await
        .unwrap()
        .is_some());

    let err = service
        .delete(EntityKind::Inventory, s.inventory, DeletionMode::Permanent, None)
        .await
        .unwrap_err();
    assert!(err.message().contains("inventory_details.inventory_id"), "{}", err);
    assert!(err.message().contains("verifications.inventory_id"), "{}", err);
}

#[tokio::test]
async fn test_unregistered_pair_is_rejected_before_touching_storage() {
    let db = setup_db().await;
    let s = scenario(&db).await;
    let before = snapshot(&db).await;
    let store = RecordingStore::new(db.clone());
    let service = LifecycleService::new(store.clone());

    let err = service
        .delete(EntityKind::User, s.u1, DeletionMode::Permanent, None)
        .await
        .unwrap_err();
    assert_eq!(err.code(), "CONFIG_ERROR");

    let err = service
        .delete(EntityKind::Item, s.item, DeletionMode::Cascade, None)
        .await
        .unwrap_err();
    assert_eq!(err.code(), "CONFIG_ERROR");

    assert!(store.writes().is_empty());
    assert_eq!(snapshot(&db).await, before);
}

#[tokio::test]
async fn test_cascade_mode_routes_to_orchestrator() {
    let db = setup_db().await;
    let s = scenario(&db).await;
    let service = LifecycleService::from_connection(db.clone());

    assert!(service
        .delete(EntityKind::Zone, s.zone, DeletionMode::Cascade, Some(s.u2))
        .await
        .unwrap());
    assert!(items::Entity::find_by_id(s.item)
        .one(&db)
        .await
        .unwrap()
        .is_none());
    assert!(user_active(&db, s.u2).await);
}
