//! Entity, aggregate and deletion-mode identifiers.

use std::{fmt, str::FromStr};

use error::AppError;
use serde::{Deserialize, Serialize};

/// Every table the lifecycle engine can touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Company,
    Branch,
    Zone,
    Item,
    Inventory,
    InventoryDetail,
    Verification,
    Checker,
    User,
    Operating,
    OperatingGroup,
    State,
}

impl EntityKind {
    pub const ALL: [EntityKind; 12] = [
        EntityKind::Company,
        EntityKind::Branch,
        EntityKind::Zone,
        EntityKind::Item,
        EntityKind::Inventory,
        EntityKind::InventoryDetail,
        EntityKind::Verification,
        EntityKind::Checker,
        EntityKind::User,
        EntityKind::Operating,
        EntityKind::OperatingGroup,
        EntityKind::State,
    ];

    /// Name used on the command line and in log fields.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Company => "company",
            EntityKind::Branch => "branch",
            EntityKind::Zone => "zone",
            EntityKind::Item => "item",
            EntityKind::Inventory => "inventory",
            EntityKind::InventoryDetail => "inventory-detail",
            EntityKind::Verification => "verification",
            EntityKind::Checker => "checker",
            EntityKind::User => "user",
            EntityKind::Operating => "operating",
            EntityKind::OperatingGroup => "operating-group",
            EntityKind::State => "state",
        }
    }

    /// Backing table name.
    pub fn table_name(&self) -> &'static str {
        match self {
            EntityKind::Company => "companies",
            EntityKind::Branch => "branches",
            EntityKind::Zone => "zones",
            EntityKind::Item => "items",
            EntityKind::Inventory => "inventories",
            EntityKind::InventoryDetail => "inventory_details",
            EntityKind::Verification => "verifications",
            EntityKind::Checker => "checkers",
            EntityKind::User => "users",
            EntityKind::Operating => "operatings",
            EntityKind::OperatingGroup => "operating_groups",
            EntityKind::State => "states",
        }
    }

    /// The aggregate this kind roots, if it is a hierarchical node.
    pub fn aggregate(&self) -> Option<AggregateKind> {
        match self {
            EntityKind::Company => Some(AggregateKind::Company),
            EntityKind::Branch => Some(AggregateKind::Branch),
            EntityKind::Zone => Some(AggregateKind::Zone),
            _ => None,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for EntityKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        EntityKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized || kind.table_name().replace('_', "-") == normalized)
            .ok_or_else(|| AppError::bad_request(format!("Unknown entity type '{}'", s)))
    }
}

/// Hierarchical node that can root a cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregateKind {
    Company,
    Branch,
    Zone,
}

impl AggregateKind {
    pub fn entity(&self) -> EntityKind {
        match self {
            AggregateKind::Company => EntityKind::Company,
            AggregateKind::Branch => EntityKind::Branch,
            AggregateKind::Zone => EntityKind::Zone,
        }
    }
}

impl fmt::Display for AggregateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.entity().as_str()) }
}

/// How a delete request is carried out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeletionMode {
    /// Set `active = false` on one row.
    Logical,
    /// Hard-delete one row.
    Permanent,
    /// Remove an aggregate with its whole subtree.
    Cascade,
}

impl DeletionMode {
    pub const ALL: [DeletionMode; 3] = [DeletionMode::Logical, DeletionMode::Permanent, DeletionMode::Cascade];

    pub fn as_str(&self) -> &'static str {
        match self {
            DeletionMode::Logical => "logical",
            DeletionMode::Permanent => "permanent",
            DeletionMode::Cascade => "cascade",
        }
    }
}

impl fmt::Display for DeletionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for DeletionMode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        DeletionMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == normalized)
            .ok_or_else(|| AppError::bad_request(format!("Unknown deletion mode '{}'", s)))
    }
}
