//! Shared fixtures for lifecycle integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use entity::{
    branches,
    checkers,
    companies,
    inventories,
    inventory_details,
    items,
    operating_groups,
    operatings,
    states,
    users,
    verifications,
    zones,
};
use error::{AppError, Result};
use lifecycle::{AggregateKind, EntityKind, LifecycleStore, SeaStore, StepAction, SubtreeGraph};
use sea_orm::{
    ActiveModelTrait,
    ConnectOptions,
    DatabaseConnection,
    DatabaseTransaction,
    EntityTrait,
    QueryOrder,
    QuerySelect,
    Set,
};

/// Fresh migrated in-memory database.
///
/// A single pooled connection keeps every query on the same in-memory database.
pub async fn setup_db() -> DatabaseConnection {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("debug")
        .try_init();

    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).sqlx_logging(false);
    let db = migration::SeaDb::connect_with(options)
        .await
        .expect("Failed to connect to sqlite");
    db.migrate().await.expect("Failed to run migrations");
    db.inner
}

pub async fn user(db: &DatabaseConnection, name: &str) -> i32 {
    users::ActiveModel {
        username: Set(name.to_string()),
        email: Set(format!("{}@warehouse.test", name)),
        full_name: Set(None),
        active: Set(true),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
    .id
}

pub async fn state(db: &DatabaseConnection, name: &str) -> i32 {
    states::ActiveModel {
        name: Set(name.to_string()),
        active: Set(true),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
    .id
}

pub async fn company(db: &DatabaseConnection, user_id: Option<i32>) -> i32 {
    companies::ActiveModel {
        name: Set("Acme Storage".to_string()),
        tax_id: Set(None),
        user_id: Set(user_id),
        active: Set(true),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
    .id
}

pub async fn branch(db: &DatabaseConnection, company_id: i32, user_id: Option<i32>) -> i32 {
    branches::ActiveModel {
        company_id: Set(company_id),
        name: Set("North".to_string()),
        address: Set(None),
        user_id: Set(user_id),
        active: Set(true),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
    .id
}

pub async fn zone(db: &DatabaseConnection, branch_id: i32, user_id: Option<i32>) -> i32 {
    zones::ActiveModel {
        branch_id: Set(branch_id),
        name: Set("Cold room".to_string()),
        user_id: Set(user_id),
        active: Set(true),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
    .id
}

pub async fn item(db: &DatabaseConnection, zone_id: i32, state_id: i32) -> i32 {
    items::ActiveModel {
        zone_id: Set(zone_id),
        state_id: Set(state_id),
        code: Set(format!("ITEM-{}", zone_id)),
        description: Set(None),
        active: Set(true),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
    .id
}

pub async fn inventory(db: &DatabaseConnection, zone_id: i32) -> i32 {
    inventories::ActiveModel {
        zone_id: Set(zone_id),
        name: Set("Quarterly count".to_string()),
        taken_at: Set(Utc::now()),
        active: Set(true),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
    .id
}

pub async fn detail(db: &DatabaseConnection, inventory_id: i32, item_id: i32, state_id: i32) -> i32 {
    inventory_details::ActiveModel {
        inventory_id: Set(inventory_id),
        item_id: Set(item_id),
        state_id: Set(state_id),
        observation: Set(None),
        active: Set(true),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
    .id
}

pub async fn checker(db: &DatabaseConnection, branch_id: i32, user_id: Option<i32>) -> i32 {
    checkers::ActiveModel {
        branch_id: Set(branch_id),
        user_id: Set(user_id),
        name: Set("Auditor".to_string()),
        active: Set(true),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
    .id
}

pub async fn verification(db: &DatabaseConnection, inventory_id: Option<i32>, checker_id: Option<i32>) -> i32 {
    verifications::ActiveModel {
        inventory_id: Set(inventory_id),
        checker_id: Set(checker_id),
        approved: Set(true),
        verified_at: Set(Utc::now()),
        active: Set(true),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
    .id
}

/// Operating record for `user_id` with one group. Returns `(operating, group)`.
pub async fn operating(db: &DatabaseConnection, user_id: i32) -> (i32, i32) {
    let operating = operatings::ActiveModel {
        user_id: Set(user_id),
        name: Set("Night shift".to_string()),
        active: Set(true),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
    .id;
    let group = operating_groups::ActiveModel {
        operating_id: Set(operating),
        name: Set("Forklifts".to_string()),
        active: Set(true),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
    .id;
    (operating, group)
}

/// `count` extra details for one inventory, inserted in slices SQLite accepts.
pub async fn details_bulk(db: &DatabaseConnection, inventory_id: i32, item_id: i32, state_id: i32, count: usize) {
    let rows: Vec<inventory_details::ActiveModel> = (0..count)
        .map(|_| {
            inventory_details::ActiveModel {
                inventory_id: Set(inventory_id),
                item_id: Set(item_id),
                state_id: Set(state_id),
                observation: Set(None),
                active: Set(true),
                ..Default::default()
            }
        })
        .collect();
    for slice in rows.chunks(100) {
        inventory_details::Entity::insert_many(slice.to_vec())
            .exec(db)
            .await
            .unwrap();
    }
}

/// `count` extra unmanaged zones under one branch.
pub async fn zones_bulk(db: &DatabaseConnection, branch_id: i32, count: usize) {
    let rows: Vec<zones::ActiveModel> = (0..count)
        .map(|n| {
            zones::ActiveModel {
                branch_id: Set(branch_id),
                name: Set(format!("Aisle {}", n)),
                user_id: Set(None),
                active: Set(true),
                created_at: Set(Utc::now()),
                ..Default::default()
            }
        })
        .collect();
    for slice in rows.chunks(100) {
        zones::Entity::insert_many(slice.to_vec())
            .exec(db)
            .await
            .unwrap();
    }
}

/// Company C -> Branch B1 (manager U1) -> Zone Z1 (manager U2) -> Item I1,
/// Inventory V1 with detail D1 and verification F1. U3 is unrelated.
#[derive(Debug, Clone, Copy)]
pub struct Scenario {
    pub company:      i32,
    pub branch:       i32,
    pub zone:         i32,
    pub item:         i32,
    pub inventory:    i32,
    pub detail:       i32,
    pub verification: i32,
    pub state:        i32,
    pub u1:           i32,
    pub u2:           i32,
    pub u3:           i32,
}

pub async fn scenario(db: &DatabaseConnection) -> Scenario {
    let u1 = user(db, "u1").await;
    let u2 = user(db, "u2").await;
    let u3 = user(db, "u3").await;
    let state = state(db, "good").await;

    let company = company(db, None).await;
    let branch = branch(db, company, Some(u1)).await;
    let zone = zone(db, branch, Some(u2)).await;
    let item = item(db, zone, state).await;
    let inventory = inventory(db, zone).await;
    let detail = detail(db, inventory, item, state).await;
    let verification = verification(db, Some(inventory), None).await;

    Scenario {
        company,
        branch,
        zone,
        item,
        inventory,
        detail,
        verification,
        state,
        u1,
        u2,
        u3,
    }
}

async fn rows<E: EntityTrait>(db: &DatabaseConnection, id: E::Column, active: E::Column) -> Vec<(i32, bool)> {
    E::find()
        .select_only()
        .column(id)
        .column(active)
        .order_by_asc(id)
        .into_tuple()
        .all(db)
        .await
        .unwrap()
}

/// `(id, active)` of every row of every table.
pub async fn snapshot(db: &DatabaseConnection) -> Vec<(&'static str, Vec<(i32, bool)>)> {
    vec![
        ("companies", rows::<companies::Entity>(db, companies::Column::Id, companies::Column::Active).await),
        ("branches", rows::<branches::Entity>(db, branches::Column::Id, branches::Column::Active).await),
        ("zones", rows::<zones::Entity>(db, zones::Column::Id, zones::Column::Active).await),
        ("items", rows::<items::Entity>(db, items::Column::Id, items::Column::Active).await),
        ("inventories", rows::<inventories::Entity>(db, inventories::Column::Id, inventories::Column::Active).await),
        (
            "inventory_details",
            rows::<inventory_details::Entity>(db, inventory_details::Column::Id, inventory_details::Column::Active)
                .await,
        ),
        (
            "verifications",
            rows::<verifications::Entity>(db, verifications::Column::Id, verifications::Column::Active).await,
        ),
        ("checkers", rows::<checkers::Entity>(db, checkers::Column::Id, checkers::Column::Active).await),
        ("users", rows::<users::Entity>(db, users::Column::Id, users::Column::Active).await),
        ("operatings", rows::<operatings::Entity>(db, operatings::Column::Id, operatings::Column::Active).await),
        (
            "operating_groups",
            rows::<operating_groups::Entity>(db, operating_groups::Column::Id, operating_groups::Column::Active).await,
        ),
    ]
}

pub async fn user_active(db: &DatabaseConnection, id: i32) -> bool {
    users::Entity::find_by_id(id)
        .one(db)
        .await
        .unwrap()
        .map(|u| u.active)
        .unwrap_or(false)
}

/// Fault injected by [`RecordingStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    /// The write fails with a database error.
    Fail(StepAction, EntityKind),
    /// The removal silently affects no rows, as if another writer got there first.
    Skip(EntityKind),
}

/// Store wrapper that records every batched write and can inject faults.
pub struct RecordingStore {
    inner:  SeaStore,
    fault:  Option<Fault>,
    writes: Mutex<Vec<(StepAction, EntityKind, Vec<i32>)>>,
}

impl RecordingStore {
    pub fn new(db: DatabaseConnection) -> Arc<Self> { Self::with_fault(db, None) }

    pub fn with_fault(db: DatabaseConnection, fault: Option<Fault>) -> Arc<Self> {
        Arc::new(Self {
            inner: SeaStore::new(db),
            fault,
            writes: Mutex::new(Vec::new()),
        })
    }

    pub fn writes(&self) -> Vec<(StepAction, EntityKind, Vec<i32>)> { self.writes.lock().unwrap().clone() }

    pub fn writes_to(&self, action: StepAction, kind: EntityKind) -> Vec<Vec<i32>> {
        self.writes()
            .into_iter()
            .filter(|(a, k, _)| *a == action && *k == kind)
            .map(|(_, _, ids)| ids)
            .collect()
    }

    fn record(&self, action: StepAction, kind: EntityKind, ids: &[i32]) -> Result<()> {
        self.writes
            .lock()
            .unwrap()
            .push((action, kind, ids.to_vec()));
        if self.fault == Some(Fault::Fail(action, kind)) {
            return Err(AppError::database(format!("injected failure on {} {}", action, kind)));
        }
        Ok(())
    }
}

#[async_trait]
impl LifecycleStore for RecordingStore {
    async fn begin(&self) -> Result<DatabaseTransaction> { self.inner.begin().await }

    async fn load_subtree(
        &self,
        txn: &DatabaseTransaction,
        root: AggregateKind,
        root_id: i32,
    ) -> Result<Option<SubtreeGraph>> {
        self.inner.load_subtree(txn, root, root_id).await
    }

    async fn remove_rows(&self, txn: &DatabaseTransaction, kind: EntityKind, ids: &[i32]) -> Result<u64> {
        self.record(StepAction::Remove, kind, ids)?;
        if self.fault == Some(Fault::Skip(kind)) {
            return Ok(0);
        }
        self.inner.remove_rows(txn, kind, ids).await
    }

    async fn set_active_false(&self, txn: &DatabaseTransaction, kind: EntityKind, ids: &[i32]) -> Result<u64> {
        self.record(StepAction::Deactivate, kind, ids)?;
        self.inner.set_active_false(txn, kind, ids).await
    }

    async fn find_active(&self, txn: &DatabaseTransaction, kind: EntityKind, id: i32) -> Result<Option<bool>> {
        self.inner.find_active(txn, kind, id).await
    }

    async fn dependents_of(&self, kind: EntityKind, id: i32) -> Result<Vec<String>> {
        self.inner.dependents_of(kind, id).await
    }
}
