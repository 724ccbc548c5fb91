//! # Cascade Planning
//!
//! Turns a materialized subtree into an ordered list of batched writes.
//!
//! Every collected identity lives in a `BTreeSet`, so a row reachable through
//! several owner paths (a user managing both a branch and a zone, a verification
//! reachable from its inventory and its checker) lands in exactly one batch.
//!
//! Batches are ordered leaf-first so `RESTRICT` foreign keys are never hit:
//!
//! 1. inventory details, verifications, items, inventories, checkers
//! 2. user deactivation (acting user excluded)
//! 3. operating groups, operatings (only when collected, i.e. company scope)
//! 4. zones, branches, companies

use std::{collections::{BTreeMap, BTreeSet}, fmt};

use serde::Serialize;

use crate::{
    graph::{BranchNode, CheckerNode, CompanyNode, OperatingNode, ZoneNode},
    kinds::{AggregateKind, EntityKind},
};

/// Kind of write a step issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepAction {
    /// Hard row delete
    Remove,
    /// `active = false`
    Deactivate,
}

impl fmt::Display for StepAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepAction::Remove => f.write_str("remove"),
            StepAction::Deactivate => f.write_str("deactivate"),
        }
    }
}

/// One batched write of a cascade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CascadeStep {
    pub action: StepAction,
    pub kind:   EntityKind,
    pub ids:    Vec<i32>,
}

impl CascadeStep {
    /// Stage name used in logs, e.g. `remove_inventory_details`.
    pub fn stage(&self) -> String { format!("{}_{}", self.action, self.kind.table_name()) }
}

/// Ordered writes for one cascade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CascadePlan {
    pub aggregate: AggregateKind,
    pub root_id:   i32,
    pub steps:     Vec<CascadeStep>,
}

impl CascadePlan {
    pub fn ids_for(&self, action: StepAction, kind: EntityKind) -> &[i32] {
        self.steps
            .iter()
            .find(|step| step.action == action && step.kind == kind)
            .map(|step| step.ids.as_slice())
            .unwrap_or(&[])
    }
}

/// Collects identities from a subtree and emits a [`CascadePlan`].
#[derive(Debug, Default)]
pub struct PlanBuilder {
    acting_user_id: Option<i32>,
    details:        BTreeSet<i32>,
    verifications:  BTreeSet<i32>,
    items:          BTreeSet<i32>,
    inventories:    BTreeSet<i32>,
    checkers:       BTreeSet<i32>,
    users:          BTreeSet<i32>,
    zones:          BTreeSet<i32>,
    branches:       BTreeSet<i32>,
    companies:      BTreeSet<i32>,
    operatings:     BTreeMap<i32, OperatingNode>,
}

impl PlanBuilder {
    pub fn new(acting_user_id: Option<i32>) -> Self {
        Self {
            acting_user_id,
            ..Default::default()
        }
    }

    /// Adds a zone with its items, inventories and manager.
    pub fn add_zone(&mut self, zone: &ZoneNode) -> &mut Self {
        self.zones.insert(zone.id);
        self.users.extend(zone.user_id);
        self.items.extend(zone.item_ids.iter().copied());
        for inventory in &zone.inventories {
            self.inventories.insert(inventory.id);
            self.details.extend(inventory.detail_ids.iter().copied());
            self.verifications
                .extend(inventory.verification_ids.iter().copied());
        }
        self
    }

    pub fn add_checker(&mut self, checker: &CheckerNode) -> &mut Self {
        self.checkers.insert(checker.id);
        self.users.extend(checker.user_id);
        self.verifications
            .extend(checker.verification_ids.iter().copied());
        self
    }

    /// Adds a branch, its zones, its checkers and its manager.
    pub fn add_branch(&mut self, branch: &BranchNode) -> &mut Self {
        self.branches.insert(branch.id);
        self.users.extend(branch.user_id);
        for zone in &branch.zones {
            self.add_zone(zone);
        }
        for checker in &branch.checkers {
            self.add_checker(checker);
        }
        self
    }

    /// Adds a company and its branches. Operating records are not collected here.
    pub fn add_company(&mut self, company: &CompanyNode) -> &mut Self {
        self.companies.insert(company.id);
        self.users.extend(company.user_id);
        for branch in &company.branches {
            self.add_branch(branch);
        }
        self
    }

    /// Adds operating records as removal candidates.
    ///
    /// Only records owned by a user that ends up deactivated are removed.
    pub fn add_operatings(&mut self, operatings: &[OperatingNode]) -> &mut Self {
        for operating in operatings {
            self.operatings
                .entry(operating.id)
                .or_insert_with(|| operating.clone());
        }
        self
    }

    /// Users that will be deactivated.
    pub fn deactivated_users(&self) -> BTreeSet<i32> {
        self.users
            .iter()
            .copied()
            .filter(|id| Some(*id) != self.acting_user_id)
            .collect()
    }

    pub fn build(self, aggregate: AggregateKind, root_id: i32) -> CascadePlan {
        let users = self.deactivated_users();

        let mut operatings = BTreeSet::new();
        let mut groups = BTreeSet::new();
        for operating in self.operatings.values() {
            if users.contains(&operating.user_id) {
                operatings.insert(operating.id);
                groups.extend(operating.group_ids.iter().copied());
            }
        }

        let batches = [
            (StepAction::Remove, EntityKind::InventoryDetail, self.details),
            (StepAction::Remove, EntityKind::Verification, self.verifications),
            (StepAction::Remove, EntityKind::Item, self.items),
            (StepAction::Remove, EntityKind::Inventory, self.inventories),
            (StepAction::Remove, EntityKind::Checker, self.checkers),
            (StepAction::Deactivate, EntityKind::User, users),
            (StepAction::Remove, EntityKind::OperatingGroup, groups),
            (StepAction::Remove, EntityKind::Operating, operatings),
            (StepAction::Remove, EntityKind::Zone, self.zones),
            (StepAction::Remove, EntityKind::Branch, self.branches),
            (StepAction::Remove, EntityKind::Company, self.companies),
        ];

        let steps = batches
            .into_iter()
            .filter(|(_, _, ids)| !ids.is_empty())
            .map(|(action, kind, ids)| {
                CascadeStep {
                    action,
                    kind,
                    ids: ids.into_iter().collect(),
                }
            })
            .collect();

        CascadePlan {
            aggregate,
            root_id,
            steps,
        }
    }
}

/// Outcome of a committed cascade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CascadeReport {
    pub operation_id:      String,
    pub aggregate:         AggregateKind,
    pub root_id:           i32,
    pub acting_user_id:    Option<i32>,
    /// Rows removed per entity kind.
    pub removed:           BTreeMap<EntityKind, u64>,
    pub deactivated_users: u64,
}

impl CascadeReport {
    pub fn new(operation_id: impl ToString, aggregate: AggregateKind, root_id: i32, acting_user_id: Option<i32>) -> Self {
        Self {
            operation_id: operation_id.to_string(),
            aggregate,
            root_id,
            acting_user_id,
            removed: BTreeMap::new(),
            deactivated_users: 0,
        }
    }

    pub fn record(&mut self, step: &CascadeStep, rows: u64) {
        match step.action {
            StepAction::Remove => *self.removed.entry(step.kind).or_default() += rows,
            StepAction::Deactivate => self.deactivated_users += rows,
        }
    }

    pub fn total_removed(&self) -> u64 { self.removed.values().sum() }
}
