//! # Warehouse Lifecycle Engine
//!
//! Removes or deactivates entities of the warehouse hierarchy.
//!
//! Three deletion modes are supported:
//!
//! - **Logical**: flips the row's `active` flag.
//! - **Permanent**: hard-deletes a single row, relying on `RESTRICT` foreign keys.
//! - **Cascade**: removes a whole Company, Branch or Zone subtree in one transaction, deactivating (never
//!   deleting) every user account reachable from it except the acting user.
//!
//! Callers go through [`LifecycleService`]; the [`StrategyResolver`] maps `(EntityKind, DeletionMode)` pairs to
//! strategies once at construction time.

pub mod graph;
pub mod kinds;
pub mod orchestrator;
pub mod plan;
pub mod resolver;
pub mod service;
pub mod store;
pub mod strategy;

pub use graph::SubtreeGraph;
pub use kinds::{AggregateKind, DeletionMode, EntityKind};
pub use orchestrator::{BranchCascade, CascadeOrchestrator, CompanyCascade, ZoneCascade};
pub use plan::{CascadePlan, CascadeReport, CascadeStep, PlanBuilder, StepAction};
pub use resolver::StrategyResolver;
pub use service::LifecycleService;
pub use store::{LifecycleStore, SeaStore};
pub use strategy::{CascadeDelete, DeleteRequest, DeleteStrategy, LogicalDelete, PermanentDelete};
