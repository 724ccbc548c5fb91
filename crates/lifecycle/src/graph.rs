//! In-memory subtree materialized by [`LifecycleStore::load_subtree`](crate::LifecycleStore::load_subtree).
//!
//! The graph holds identities only; orchestrators plan against it without
//! touching the database again.

use crate::kinds::AggregateKind;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompanyNode {
    pub id:         i32,
    pub active:     bool,
    pub user_id:    Option<i32>,
    pub branches:   Vec<BranchNode>,
    /// Operating records of every user reachable from the company.
    pub operatings: Vec<OperatingNode>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BranchNode {
    pub id:       i32,
    pub active:   bool,
    pub user_id:  Option<i32>,
    pub zones:    Vec<ZoneNode>,
    pub checkers: Vec<CheckerNode>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ZoneNode {
    pub id:          i32,
    pub active:      bool,
    pub user_id:     Option<i32>,
    pub item_ids:    Vec<i32>,
    pub inventories: Vec<InventoryNode>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InventoryNode {
    pub id:               i32,
    pub detail_ids:       Vec<i32>,
    pub verification_ids: Vec<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckerNode {
    pub id:               i32,
    pub user_id:          Option<i32>,
    pub verification_ids: Vec<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperatingNode {
    pub id:        i32,
    pub user_id:   i32,
    pub group_ids: Vec<i32>,
}

/// A materialized aggregate and everything it owns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubtreeGraph {
    Company(CompanyNode),
    Branch(BranchNode),
    Zone(ZoneNode),
}

impl SubtreeGraph {
    pub fn aggregate(&self) -> AggregateKind {
        match self {
            SubtreeGraph::Company(_) => AggregateKind::Company,
            SubtreeGraph::Branch(_) => AggregateKind::Branch,
            SubtreeGraph::Zone(_) => AggregateKind::Zone,
        }
    }

    pub fn root_id(&self) -> i32 {
        match self {
            SubtreeGraph::Company(node) => node.id,
            SubtreeGraph::Branch(node) => node.id,
            SubtreeGraph::Zone(node) => node.id,
        }
    }

    pub fn root_active(&self) -> bool {
        match self {
            SubtreeGraph::Company(node) => node.active,
            SubtreeGraph::Branch(node) => node.active,
            SubtreeGraph::Zone(node) => node.active,
        }
    }
}

impl CompanyNode {
    /// Every user referenced anywhere below (and including) the company, duplicates included.
    pub fn user_refs(&self) -> impl Iterator<Item = i32> + '_ {
        self.user_id
            .into_iter()
            .chain(self.branches.iter().flat_map(BranchNode::user_refs))
    }
}

impl BranchNode {
    pub fn user_refs(&self) -> impl Iterator<Item = i32> + '_ {
        self.user_id
            .into_iter()
            .chain(self.zones.iter().filter_map(|zone| zone.user_id))
            .chain(self.checkers.iter().filter_map(|checker| checker.user_id))
    }
}
