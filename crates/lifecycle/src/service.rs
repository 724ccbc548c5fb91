//! # Lifecycle Service
//!
//! Entry point for callers. Routes every request through the
//! [`StrategyResolver`] and translates internal errors: a missing target is
//! reported as `Ok(false)`, anything else is logged and returned.

use std::sync::Arc;

use error::{AppError, Result};
use sea_orm::DatabaseConnection;
use tracing::{error, info};

use crate::{
    kinds::{AggregateKind, DeletionMode, EntityKind},
    plan::CascadeReport,
    resolver::StrategyResolver,
    store::{LifecycleStore, SeaStore},
    strategy::DeleteRequest,
};

pub struct LifecycleService {
    resolver: StrategyResolver,
}

impl LifecycleService {
    pub fn new(store: Arc<dyn LifecycleStore>) -> Self { Self::with_resolver(StrategyResolver::new(store)) }

    pub fn with_resolver(resolver: StrategyResolver) -> Self {
        Self {
            resolver,
        }
    }

    /// Service over a SeaORM connection with the default wiring.
    pub fn from_connection(db: DatabaseConnection) -> Self { Self::new(Arc::new(SeaStore::new(db))) }

    pub fn resolver(&self) -> &StrategyResolver { &self.resolver }

    /// Delete `id` of `kind` with the requested mode.
    ///
    /// Returns `Ok(false)` when there was nothing to delete.
    ///
    /// # Errors
    ///
    /// - `Config` for an unregistered `(kind, mode)` pair
    /// - `Conflict` when dependents block a permanent delete, or a concurrent write won
    /// - `TransactionFailure` when a cascade was rolled back
    pub async fn delete(
        &self,
        kind: EntityKind,
        id: i32,
        mode: DeletionMode,
        acting_user_id: Option<i32>,
    ) -> Result<bool> {
        let strategy = self.resolver.resolve(kind, mode)?;
        match strategy
            .apply(DeleteRequest::new(id, acting_user_id))
            .await
        {
            Ok(deleted) => {
                info!(entity = %kind, id, mode = %mode, deleted, "Delete finished");
                Ok(deleted)
            },
            Err(AppError::NotFound {
                ..
            }) => Ok(false),
            Err(err) => {
                error!(entity = %kind, id, mode = %mode, code = err.code(), error = %err, "Delete failed");
                Err(err)
            },
        }
    }

    /// Cascade an aggregate and return what was removed. `Ok(None)` when there was nothing to remove.
    pub async fn cascade(
        &self,
        aggregate: AggregateKind,
        id: i32,
        acting_user_id: Option<i32>,
    ) -> Result<Option<CascadeReport>> {
        let strategy = self
            .resolver
            .resolve(aggregate.entity(), DeletionMode::Cascade)?;
        let orchestrator = strategy.as_cascade().ok_or_else(|| {
            AppError::config(format!("Strategy registered for {} cascade is not a cascade", aggregate))
        })?;

        match orchestrator.run(id, acting_user_id).await {
            Ok(report) => Ok(report),
            Err(AppError::NotFound {
                ..
            }) => Ok(None),
            Err(err) => {
                error!(aggregate = %aggregate, id, code = err.code(), error = %err, "Cascade failed");
                Err(err)
            },
        }
    }

    pub async fn delete_company_cascade(&self, company_id: i32, acting_user_id: i32) -> Result<bool> {
        self.delete(
            EntityKind::Company,
            company_id,
            DeletionMode::Cascade,
            Some(acting_user_id),
        )
        .await
    }

    pub async fn delete_branch_cascade(&self, branch_id: i32, acting_user_id: Option<i32>) -> Result<bool> {
        self.delete(EntityKind::Branch, branch_id, DeletionMode::Cascade, acting_user_id)
            .await
    }

    pub async fn delete_zone_cascade(&self, zone_id: i32, acting_user_id: Option<i32>) -> Result<bool> {
        self.delete(EntityKind::Zone, zone_id, DeletionMode::Cascade, acting_user_id)
            .await
    }
}
