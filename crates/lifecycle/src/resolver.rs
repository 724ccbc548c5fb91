//! # Strategy Resolver
//!
//! Explicit `(EntityKind, DeletionMode) -> constructor` table. Every strategy is
//! built once when the resolver is created; unregistered pairs are a wiring
//! error, reported as `AppError::Config`.

use std::{collections::BTreeMap, sync::Arc};

use error::{AppError, Result};

use crate::{
    kinds::{DeletionMode, EntityKind},
    orchestrator::{BranchCascade, CompanyCascade, ZoneCascade},
    store::LifecycleStore,
    strategy::{CascadeDelete, DeleteStrategy, LogicalDelete, PermanentDelete},
};

/// Builds the strategy for one table entry.
pub type StrategyCtor = fn(EntityKind, &Arc<dyn LifecycleStore>) -> Arc<dyn DeleteStrategy>;

fn logical(kind: EntityKind, store: &Arc<dyn LifecycleStore>) -> Arc<dyn DeleteStrategy> {
    Arc::new(LogicalDelete::new(kind, store.clone()))
}

fn permanent(kind: EntityKind, store: &Arc<dyn LifecycleStore>) -> Arc<dyn DeleteStrategy> {
    Arc::new(PermanentDelete::new(kind, store.clone()))
}

fn company_cascade(_: EntityKind, store: &Arc<dyn LifecycleStore>) -> Arc<dyn DeleteStrategy> {
    Arc::new(CascadeDelete::new(Arc::new(CompanyCascade::new(store.clone()))))
}

fn branch_cascade(_: EntityKind, store: &Arc<dyn LifecycleStore>) -> Arc<dyn DeleteStrategy> {
    Arc::new(CascadeDelete::new(Arc::new(BranchCascade::new(store.clone()))))
}

fn zone_cascade(_: EntityKind, store: &Arc<dyn LifecycleStore>) -> Arc<dyn DeleteStrategy> {
    Arc::new(CascadeDelete::new(Arc::new(ZoneCascade::new(store.clone()))))
}

/// Default wiring.
///
/// Aggregates cascade instead of being hard-deleted; user accounts are only
/// ever deactivated.
pub const DEFAULT_STRATEGIES: &[(EntityKind, DeletionMode, StrategyCtor)] = &[
    (EntityKind::Company, DeletionMode::Logical, logical),
    (EntityKind::Company, DeletionMode::Cascade, company_cascade),
    (EntityKind::Branch, DeletionMode::Logical, logical),
    (EntityKind::Branch, DeletionMode::Cascade, branch_cascade),
    (EntityKind::Zone, DeletionMode::Logical, logical),
    (EntityKind::Zone, DeletionMode::Cascade, zone_cascade),
    (EntityKind::Item, DeletionMode::Logical, logical),
    (EntityKind::Item, DeletionMode::Permanent, permanent),
    (EntityKind::Inventory, DeletionMode::Logical, logical),
    (EntityKind::Inventory, DeletionMode::Permanent, permanent),
    (EntityKind::InventoryDetail, DeletionMode::Logical, logical),
    (EntityKind::InventoryDetail, DeletionMode::Permanent, permanent),
    (EntityKind::Verification, DeletionMode::Logical, logical),
    (EntityKind::Verification, DeletionMode::Permanent, permanent),
    (EntityKind::Checker, DeletionMode::Logical, logical),
    (EntityKind::Checker, DeletionMode::Permanent, permanent),
    (EntityKind::User, DeletionMode::Logical, logical),
    (EntityKind::Operating, DeletionMode::Logical, logical),
    (EntityKind::Operating, DeletionMode::Permanent, permanent),
    (EntityKind::OperatingGroup, DeletionMode::Logical, logical),
    (EntityKind::OperatingGroup, DeletionMode::Permanent, permanent),
    (EntityKind::State, DeletionMode::Logical, logical),
    (EntityKind::State, DeletionMode::Permanent, permanent),
];

pub struct StrategyResolver {
    strategies: BTreeMap<(EntityKind, DeletionMode), Arc<dyn DeleteStrategy>>,
}

impl StrategyResolver {
    /// Resolver with the default wiring.
    pub fn new(store: Arc<dyn LifecycleStore>) -> Self { Self::from_table(store, DEFAULT_STRATEGIES) }

    /// Resolver with a custom table. Later entries replace earlier ones for the same pair.
    pub fn from_table(store: Arc<dyn LifecycleStore>, table: &[(EntityKind, DeletionMode, StrategyCtor)]) -> Self {
        let strategies = table
            .iter()
            .map(|(kind, mode, ctor)| ((*kind, *mode), ctor(*kind, &store)))
            .collect();
        Self {
            strategies,
        }
    }

    /// # Errors
    ///
    /// `AppError::Config` if the pair is not registered.
    pub fn resolve(&self, kind: EntityKind, mode: DeletionMode) -> Result<Arc<dyn DeleteStrategy>> {
        self.strategies.get(&(kind, mode)).cloned().ok_or_else(|| {
            AppError::config(format!(
                "No {} deletion strategy registered for {}",
                mode, kind
            ))
        })
    }

    /// Every wired pair, ordered by entity then mode.
    pub fn registered(&self) -> Vec<(EntityKind, DeletionMode)> { self.strategies.keys().copied().collect() }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use sea_orm::DatabaseTransaction;

    use super::*;
    use crate::{graph::SubtreeGraph, kinds::AggregateKind};

    /// Store that must never be reached: resolution does not touch storage.
    struct Unreachable;

    #[async_trait]
    impl LifecycleStore for Unreachable {
        async fn begin(&self) -> Result<DatabaseTransaction> { Err(AppError::internal("unreachable")) }

        async fn load_subtree(&self, _: &DatabaseTransaction, _: AggregateKind, _: i32) -> Result<Option<SubtreeGraph>> {
            Err(AppError::internal("unreachable"))
        }

        async fn remove_rows(&self, _: &DatabaseTransaction, _: EntityKind, _: &[i32]) -> Result<u64> {
            Err(AppError::internal("unreachable"))
        }

        async fn set_active_false(&self, _: &DatabaseTransaction, _: EntityKind, _: &[i32]) -> Result<u64> {
            Err(AppError::internal("unreachable"))
        }

        async fn find_active(&self, _: &DatabaseTransaction, _: EntityKind, _: i32) -> Result<Option<bool>> {
            Err(AppError::internal("unreachable"))
        }

        async fn dependents_of(&self, _: EntityKind, _: i32) -> Result<Vec<String>> {
            Err(AppError::internal("unreachable"))
        }
    }

    fn resolver() -> StrategyResolver { StrategyResolver::new(Arc::new(Unreachable)) }

    #[test]
    fn test_cascade_only_for_aggregates() {
        let resolver = resolver();
        for kind in EntityKind::ALL {
            let resolved = resolver.resolve(kind, DeletionMode::Cascade);
            assert_eq!(resolved.is_ok(), kind.aggregate().is_some(), "{kind}");
        }
    }

    #[test]
    fn test_resolved_strategy_matches_request() {
        let strategy = resolver()
            .resolve(EntityKind::Branch, DeletionMode::Cascade)
            .unwrap();
        assert_eq!(strategy.kind(), EntityKind::Branch);
        assert_eq!(strategy.mode(), DeletionMode::Cascade);
        assert!(strategy.as_cascade().is_some());

        let strategy = resolver()
            .resolve(EntityKind::Item, DeletionMode::Permanent)
            .unwrap();
        assert_eq!(strategy.kind(), EntityKind::Item);
        assert!(strategy.as_cascade().is_none());
    }

    #[test]
    fn test_unregistered_pair_is_config_error() {
        let err = resolver()
            .resolve(EntityKind::User, DeletionMode::Permanent)
            .err()
            .unwrap();
        assert_eq!(err.code(), "CONFIG_ERROR");
        assert!(err.message().contains("permanent"));
        assert!(err.message().contains("user"));
    }

    #[test]
    fn test_every_kind_supports_logical() {
        let registered = resolver().registered();
        for kind in EntityKind::ALL {
            assert!(registered.contains(&(kind, DeletionMode::Logical)), "{kind}");
        }
        assert_eq!(registered.len(), DEFAULT_STRATEGIES.len());
    }

    #[test]
    fn test_custom_table() {
        let table: [(EntityKind, DeletionMode, StrategyCtor); 1] = [(EntityKind::State, DeletionMode::Logical, logical)];
        let resolver = StrategyResolver::from_table(Arc::new(Unreachable), &table);
        assert_eq!(resolver.registered(), vec![(EntityKind::State, DeletionMode::Logical)]);
        assert!(resolver
            .resolve(EntityKind::Company, DeletionMode::Cascade)
            .is_err());
    }
}
