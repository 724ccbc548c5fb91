//! SeaORM implementation of [`LifecycleStore`].

use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
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
use error::{Result, ResultExt};
use logging::log_db_batch;
use sea_orm::{
    sea_query::Expr,
    ColumnTrait,
    ConnectionTrait,
    DatabaseConnection,
    DatabaseTransaction,
    DbErr,
    EntityName,
    EntityTrait,
    IdenStatic,
    QueryFilter,
    QueryOrder,
    QuerySelect,
    TransactionTrait,
};

use super::{LifecycleStore, BATCH_SIZE};
use crate::{
    graph::{BranchNode, CheckerNode, CompanyNode, InventoryNode, OperatingNode, SubtreeGraph, ZoneNode},
    kinds::{AggregateKind, EntityKind},
};

/// Runs `$body` with `$entity`, `$id` and `$active` bound to the table behind `$kind`.
macro_rules! with_table {
    ($kind:expr, | $entity:ident, $id:ident, $active:ident | $body:expr) => {
        match $kind {
            EntityKind::Company => with_table!(@bind companies, $entity, $id, $active, $body),
            EntityKind::Branch => with_table!(@bind branches, $entity, $id, $active, $body),
            EntityKind::Zone => with_table!(@bind zones, $entity, $id, $active, $body),
            EntityKind::Item => with_table!(@bind items, $entity, $id, $active, $body),
            EntityKind::Inventory => with_table!(@bind inventories, $entity, $id, $active, $body),
            EntityKind::InventoryDetail => with_table!(@bind inventory_details, $entity, $id, $active, $body),
            EntityKind::Verification => with_table!(@bind verifications, $entity, $id, $active, $body),
            EntityKind::Checker => with_table!(@bind checkers, $entity, $id, $active, $body),
            EntityKind::User => with_table!(@bind users, $entity, $id, $active, $body),
            EntityKind::Operating => with_table!(@bind operatings, $entity, $id, $active, $body),
            EntityKind::OperatingGroup => with_table!(@bind operating_groups, $entity, $id, $active, $body),
            EntityKind::State => with_table!(@bind states, $entity, $id, $active, $body),
        }
    };
    (@bind $module:ident, $entity:ident, $id:ident, $active:ident, $body:expr) => {{
        type $entity = $module::Entity;
        let $id = $module::Column::Id;
        let $active = $module::Column::Active;
        $body
    }};
}

/// Lifecycle store backed by a SeaORM connection pool.
#[derive(Debug, Clone)]
pub struct SeaStore {
    db: DatabaseConnection,
}

impl SeaStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
        }
    }

    pub fn connection(&self) -> &DatabaseConnection { &self.db }
}

#[async_trait]
impl LifecycleStore for SeaStore {
    async fn begin(&self) -> Result<DatabaseTransaction> { Ok(self.db.begin().await?) }

    async fn load_subtree(
        &self,
        txn: &DatabaseTransaction,
        root: AggregateKind,
        root_id: i32,
    ) -> Result<Option<SubtreeGraph>> {
        let loaded = match root {
            AggregateKind::Company => load_company(txn, root_id).await.map(|c| c.map(SubtreeGraph::Company)),
            AggregateKind::Branch => load_branch(txn, root_id).await.map(|b| b.map(SubtreeGraph::Branch)),
            AggregateKind::Zone => load_zone(txn, root_id).await.map(|z| z.map(SubtreeGraph::Zone)),
        };
        loaded.with_context(|| format!("loading {} {} subtree", root, root_id))
    }

    async fn remove_rows(&self, txn: &DatabaseTransaction, kind: EntityKind, ids: &[i32]) -> Result<u64> {
        if ids.is_empty() {
            return Ok(0);
        }
        let rows = with_table!(kind, |E, id, _active| delete_in::<E, _>(txn, id, ids).await)
            .with_context(|| format!("deleting from {}", kind.table_name()))?;
        log_db_batch!("delete", kind.table_name(), ids.len(), rows);
        Ok(rows)
    }

    async fn set_active_false(&self, txn: &DatabaseTransaction, kind: EntityKind, ids: &[i32]) -> Result<u64> {
        if ids.is_empty() {
            return Ok(0);
        }
        let rows = with_table!(kind, |E, id, active| deactivate_in::<E, _>(txn, id, active, ids).await)
            .with_context(|| format!("deactivating {}", kind.table_name()))?;
        log_db_batch!("deactivate", kind.table_name(), ids.len(), rows);
        Ok(rows)
    }

    async fn find_active(&self, txn: &DatabaseTransaction, kind: EntityKind, id: i32) -> Result<Option<bool>> {
        let active = with_table!(kind, |E, id_column, active| {
            E::find()
                .select_only()
                .column(active)
                .filter(id_column.eq(id))
                .into_tuple::<bool>()
                .one(txn)
                .await
        })?;
        Ok(active)
    }

    async fn dependents_of(&self, kind: EntityKind, id: i32) -> Result<Vec<String>> {
        let db = &self.db;
        let found = match kind {
            EntityKind::Company => vec![reference::<branches::Entity, _>(db, branches::Column::CompanyId, id).await?],
            EntityKind::Branch => {
                vec![
                    reference::<zones::Entity, _>(db, zones::Column::BranchId, id).await?,
                    reference::<checkers::Entity, _>(db, checkers::Column::BranchId, id).await?,
                ]
            },
            EntityKind::Zone => {
                vec![
                    reference::<items::Entity, _>(db, items::Column::ZoneId, id).await?,
                    reference::<inventories::Entity, _>(db, inventories::Column::ZoneId, id).await?,
                ]
            },
            EntityKind::Item => {
                vec![reference::<inventory_details::Entity, _>(db, inventory_details::Column::ItemId, id).await?]
            },
            EntityKind::Inventory => {
                vec![
                    reference::<inventory_details::Entity, _>(db, inventory_details::Column::InventoryId, id).await?,
                    reference::<verifications::Entity, _>(db, verifications::Column::InventoryId, id).await?,
                ]
            },
            EntityKind::Checker => {
                vec![reference::<verifications::Entity, _>(db, verifications::Column::CheckerId, id).await?]
            },
            EntityKind::User => {
                vec![
                    reference::<companies::Entity, _>(db, companies::Column::UserId, id).await?,
                    reference::<branches::Entity, _>(db, branches::Column::UserId, id).await?,
                    reference::<zones::Entity, _>(db, zones::Column::UserId, id).await?,
                    reference::<checkers::Entity, _>(db, checkers::Column::UserId, id).await?,
                    reference::<operatings::Entity, _>(db, operatings::Column::UserId, id).await?,
                ]
            },
            EntityKind::Operating => {
                vec![reference::<operating_groups::Entity, _>(db, operating_groups::Column::OperatingId, id).await?]
            },
            EntityKind::State => {
                vec![
                    reference::<items::Entity, _>(db, items::Column::StateId, id).await?,
                    reference::<inventory_details::Entity, _>(db, inventory_details::Column::StateId, id).await?,
                ]
            },
            EntityKind::InventoryDetail | EntityKind::Verification | EntityKind::OperatingGroup => Vec::new(),
        };
        Ok(found.into_iter().flatten().collect())
    }
}

async fn delete_in<E, C>(conn: &C, id: E::Column, ids: &[i32]) -> std::result::Result<u64, DbErr>
where
    E: EntityTrait,
    C: ConnectionTrait,
{
    let mut rows = 0;
    for chunk in ids.chunks(BATCH_SIZE) {
        let result = E::delete_many()
            .filter(id.is_in(chunk.iter().copied()))
            .exec(conn)
            .await?;
        rows += result.rows_affected;
    }
    Ok(rows)
}

async fn deactivate_in<E, C>(conn: &C, id: E::Column, active: E::Column, ids: &[i32]) -> std::result::Result<u64, DbErr>
where
    E: EntityTrait,
    C: ConnectionTrait,
{
    let mut rows = 0;
    for chunk in ids.chunks(BATCH_SIZE) {
        let result = E::update_many()
            .col_expr(active, Expr::value(false))
            .filter(id.is_in(chunk.iter().copied()))
            .exec(conn)
            .await?;
        rows += result.rows_affected;
    }
    Ok(rows)
}

/// Rows of `E` whose `column` is one of `parents`, ordered by `order` within each chunk.
///
/// Every parent lands in exactly one chunk, so the children of one parent stay in order.
async fn find_in<E, C>(conn: &C, column: E::Column, order: E::Column, parents: &[i32]) -> std::result::Result<Vec<E::Model>, DbErr>
where
    E: EntityTrait,
    C: ConnectionTrait,
{
    let mut found = Vec::new();
    for chunk in parents.chunks(BATCH_SIZE) {
        let rows = E::find()
            .filter(column.is_in(chunk.iter().copied()))
            .order_by_asc(order)
            .all(conn)
            .await?;
        found.extend(rows);
    }
    Ok(found)
}

/// `Some("table.column")` if any row of `E` references `id` through `column`.
async fn reference<E, C>(conn: &C, column: E::Column, id: i32) -> std::result::Result<Option<String>, DbErr>
where
    E: EntityTrait,
    C: ConnectionTrait,
{
    let found = E::find().filter(column.eq(id)).one(conn).await?;
    Ok(found.map(|_| format!("{}.{}", E::default().table_name(), column.as_str())))
}

/// Groups `(parent, child)` pairs into parent -> ordered child ids.
fn group<I>(pairs: I) -> BTreeMap<i32, Vec<i32>>
where
    I: IntoIterator<Item = (i32, i32)>,
{
    let mut grouped: BTreeMap<i32, Vec<i32>> = BTreeMap::new();
    for (parent, child) in pairs {
        grouped.entry(parent).or_default().push(child);
    }
    grouped
}

async fn load_company<C: ConnectionTrait>(conn: &C, id: i32) -> std::result::Result<Option<CompanyNode>, DbErr> {
    let Some(company) = companies::Entity::find_by_id(id).one(conn).await?
    else {
        return Ok(None);
    };

    let mut node = CompanyNode {
        id:         company.id,
        active:     company.active,
        user_id:    company.user_id,
        branches:   Vec::new(),
        operatings: Vec::new(),
    };
    if !company.active {
        return Ok(Some(node));
    }

    let branches = branches::Entity::find()
        .filter(branches::Column::CompanyId.eq(id))
        .order_by_asc(branches::Column::Id)
        .all(conn)
        .await?;
    node.branches = load_branches(conn, &branches).await?;

    let users: BTreeSet<i32> = node.user_refs().collect();
    node.operatings = load_operatings(conn, &users).await?;

    Ok(Some(node))
}

async fn load_branch<C: ConnectionTrait>(conn: &C, id: i32) -> std::result::Result<Option<BranchNode>, DbErr> {
    let Some(branch) = branches::Entity::find_by_id(id).one(conn).await?
    else {
        return Ok(None);
    };

    if !branch.active {
        return Ok(Some(BranchNode {
            id: branch.id,
            active: false,
            user_id: branch.user_id,
            ..Default::default()
        }));
    }

    Ok(load_branches(conn, &[branch]).await?.pop())
}

async fn load_zone<C: ConnectionTrait>(conn: &C, id: i32) -> std::result::Result<Option<ZoneNode>, DbErr> {
    let Some(zone) = zones::Entity::find_by_id(id).one(conn).await?
    else {
        return Ok(None);
    };

    if !zone.active {
        return Ok(Some(ZoneNode {
            id: zone.id,
            active: false,
            user_id: zone.user_id,
            ..Default::default()
        }));
    }

    Ok(load_zones(conn, &[zone]).await?.pop())
}

async fn load_branches<C: ConnectionTrait>(
    conn: &C,
    rows: &[branches::Model],
) -> std::result::Result<Vec<BranchNode>, DbErr> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }
    let branch_ids: Vec<i32> = rows.iter().map(|b| b.id).collect();

    let zone_rows = find_in::<zones::Entity, _>(conn, zones::Column::BranchId, zones::Column::Id, &branch_ids).await?;
    let zone_nodes = load_zones(conn, &zone_rows).await?;
    let mut zones_by_branch: BTreeMap<i32, Vec<ZoneNode>> = BTreeMap::new();
    for (row, node) in zone_rows.iter().zip(zone_nodes) {
        zones_by_branch.entry(row.branch_id).or_default().push(node);
    }

    let checker_rows =
        find_in::<checkers::Entity, _>(conn, checkers::Column::BranchId, checkers::Column::Id, &branch_ids).await?;
    let checker_ids: Vec<i32> = checker_rows.iter().map(|c| c.id).collect();
    let verifications_by_checker = if checker_ids.is_empty() {
        BTreeMap::new()
    }
    else {
        let rows = find_in::<verifications::Entity, _>(
            conn,
            verifications::Column::CheckerId,
            verifications::Column::Id,
            &checker_ids,
        )
        .await?;
        group(rows.iter().filter_map(|v| v.checker_id.map(|checker| (checker, v.id))))
    };
    let mut checkers_by_branch: BTreeMap<i32, Vec<CheckerNode>> = BTreeMap::new();
    for checker in checker_rows {
        checkers_by_branch
            .entry(checker.branch_id)
            .or_default()
            .push(CheckerNode {
                id:               checker.id,
                user_id:          checker.user_id,
                verification_ids: verifications_by_checker
                    .get(&checker.id)
                    .cloned()
                    .unwrap_or_default(),
            });
    }

    Ok(rows
        .iter()
        .map(|branch| {
            BranchNode {
                id:       branch.id,
                active:   branch.active,
                user_id:  branch.user_id,
                zones:    zones_by_branch.remove(&branch.id).unwrap_or_default(),
                checkers: checkers_by_branch.remove(&branch.id).unwrap_or_default(),
            }
        })
        .collect())
}

async fn load_zones<C: ConnectionTrait>(conn: &C, rows: &[zones::Model]) -> std::result::Result<Vec<ZoneNode>, DbErr> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }
    let zone_ids: Vec<i32> = rows.iter().map(|z| z.id).collect();

    let item_rows = find_in::<items::Entity, _>(conn, items::Column::ZoneId, items::Column::Id, &zone_ids).await?;
    let mut items_by_zone = group(item_rows.iter().map(|item| (item.zone_id, item.id)));

    let inventory_rows =
        find_in::<inventories::Entity, _>(conn, inventories::Column::ZoneId, inventories::Column::Id, &zone_ids).await?;
    let inventory_ids: Vec<i32> = inventory_rows.iter().map(|i| i.id).collect();

    let (mut details_by_inventory, mut verifications_by_inventory) = if inventory_ids.is_empty() {
        (BTreeMap::new(), BTreeMap::new())
    }
    else {
        let details = find_in::<inventory_details::Entity, _>(
            conn,
            inventory_details::Column::InventoryId,
            inventory_details::Column::Id,
            &inventory_ids,
        )
        .await?;
        let verifications = find_in::<verifications::Entity, _>(
            conn,
            verifications::Column::InventoryId,
            verifications::Column::Id,
            &inventory_ids,
        )
        .await?;
        (
            group(details.iter().map(|d| (d.inventory_id, d.id))),
            group(
                verifications
                    .iter()
                    .filter_map(|v| v.inventory_id.map(|inventory| (inventory, v.id))),
            ),
        )
    };

    let mut inventories_by_zone: BTreeMap<i32, Vec<InventoryNode>> = BTreeMap::new();
    for inventory in inventory_rows {
        inventories_by_zone
            .entry(inventory.zone_id)
            .or_default()
            .push(InventoryNode {
                id:               inventory.id,
                detail_ids:       details_by_inventory
                    .remove(&inventory.id)
                    .unwrap_or_default(),
                verification_ids: verifications_by_inventory
                    .remove(&inventory.id)
                    .unwrap_or_default(),
            });
    }

    Ok(rows
        .iter()
        .map(|zone| {
            ZoneNode {
                id:          zone.id,
                active:      zone.active,
                user_id:     zone.user_id,
                item_ids:    items_by_zone.remove(&zone.id).unwrap_or_default(),
                inventories: inventories_by_zone.remove(&zone.id).unwrap_or_default(),
            }
        })
        .collect())
}

async fn load_operatings<C: ConnectionTrait>(
    conn: &C,
    users: &BTreeSet<i32>,
) -> std::result::Result<Vec<OperatingNode>, DbErr> {
    if users.is_empty() {
        return Ok(Vec::new());
    }

    let user_ids: Vec<i32> = users.iter().copied().collect();
    let operating_rows =
        find_in::<operatings::Entity, _>(conn, operatings::Column::UserId, operatings::Column::Id, &user_ids).await?;
    if operating_rows.is_empty() {
        return Ok(Vec::new());
    }

    let operating_ids: Vec<i32> = operating_rows.iter().map(|o| o.id).collect();
    let group_rows = find_in::<operating_groups::Entity, _>(
        conn,
        operating_groups::Column::OperatingId,
        operating_groups::Column::Id,
        &operating_ids,
    )
    .await?;
    let mut groups_by_operating = group(group_rows.iter().map(|g| (g.operating_id, g.id)));

    Ok(operating_rows
        .into_iter()
        .map(|operating| {
            OperatingNode {
                id:        operating.id,
                user_id:   operating.user_id,
                group_ids: groups_by_operating
                    .remove(&operating.id)
                    .unwrap_or_default(),
            }
        })
        .collect())
}
