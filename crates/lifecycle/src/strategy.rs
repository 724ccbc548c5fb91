//! # Deletion Strategies
//!
//! Interchangeable algorithms selected by [`StrategyResolver`](crate::StrategyResolver):
//!
//! - [`LogicalDelete`] flips `active` on a single row.
//! - [`PermanentDelete`] hard-deletes a single row; dependents make it fail with a
//!   conflict naming the referencing relation.
//! - [`CascadeDelete`] hands the request to an aggregate's orchestrator.
//!
//! All strategies return `Ok(false)` when there was nothing to delete.

use std::sync::Arc;

use async_trait::async_trait;
use error::{AppError, Result};
use sea_orm::DatabaseTransaction;
use tracing::{debug, warn};

use crate::{
    kinds::{DeletionMode, EntityKind},
    orchestrator::CascadeOrchestrator,
    store::LifecycleStore,
};

/// Target of a delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteRequest {
    pub id:             i32,
    pub acting_user_id: Option<i32>,
}

impl DeleteRequest {
    pub fn new(id: i32, acting_user_id: Option<i32>) -> Self {
        Self {
            id,
            acting_user_id,
        }
    }
}

#[async_trait]
pub trait DeleteStrategy: Send + Sync {
    fn kind(&self) -> EntityKind;

    fn mode(&self) -> DeletionMode;

    async fn apply(&self, request: DeleteRequest) -> Result<bool>;

    /// The orchestrator behind a cascade strategy.
    fn as_cascade(&self) -> Option<&dyn CascadeOrchestrator> { None }
}

/// Commit on success, roll back on error.
async fn settle<T>(txn: DatabaseTransaction, result: Result<T>) -> Result<T> {
    match result {
        Ok(value) => {
            txn.commit().await?;
            Ok(value)
        },
        Err(err) => {
            if let Err(rollback) = txn.rollback().await {
                warn!(error = %rollback, "Rollback failed");
            }
            Err(err)
        },
    }
}

pub struct LogicalDelete {
    kind:  EntityKind,
    store: Arc<dyn LifecycleStore>,
}

impl LogicalDelete {
    pub fn new(kind: EntityKind, store: Arc<dyn LifecycleStore>) -> Self {
        Self {
            kind,
            store,
        }
    }

    async fn deactivate(&self, txn: &DatabaseTransaction, request: DeleteRequest) -> Result<bool> {
        if self.kind == EntityKind::User && request.acting_user_id == Some(request.id) {
            return Err(AppError::bad_request("A user cannot deactivate their own account"));
        }

        match self.store.find_active(txn, self.kind, request.id).await? {
            Some(true) => {},
            Some(false) => {
                debug!(entity = %self.kind, id = request.id, "Already inactive");
                return Ok(false);
            },
            None => {
                debug!(entity = %self.kind, id = request.id, "Not found");
                return Ok(false);
            },
        }

        let rows = self
            .store
            .set_active_false(txn, self.kind, &[request.id])
            .await?;
        self.store.save_all(txn).await?;
        Ok(rows > 0)
    }
}

#[async_trait]
impl DeleteStrategy for LogicalDelete {
    fn kind(&self) -> EntityKind { self.kind }

    fn mode(&self) -> DeletionMode { DeletionMode::Logical }

    async fn apply(&self, request: DeleteRequest) -> Result<bool> {
        let txn = self.store.begin().await?;
        let result = self.deactivate(&txn, request).await;
        settle(txn, result).await
    }
}

pub struct PermanentDelete {
    kind:  EntityKind,
    store: Arc<dyn LifecycleStore>,
}

impl PermanentDelete {
    pub fn new(kind: EntityKind, store: Arc<dyn LifecycleStore>) -> Self {
        Self {
            kind,
            store,
        }
    }

    /// Replace a constraint failure with a conflict that names the referencing relations.
    async fn explain(&self, id: i32, err: AppError) -> AppError {
        let constraint = match &err {
            AppError::Conflict {
                retryable, ..
            } => !retryable,
            other => other.message().to_lowercase().contains("foreign key"),
        };
        if !constraint {
            return err;
        }

        match self.store.dependents_of(self.kind, id).await {
            Ok(relations) if !relations.is_empty() => {
                AppError::conflict(format!(
                    "{} {} is still referenced by {}",
                    self.kind,
                    id,
                    relations.join(", ")
                ))
            },
            Ok(_) => err,
            Err(lookup) => {
                warn!(error = %lookup, entity = %self.kind, id, "Dependent lookup failed");
                err
            },
        }
    }
}

#[async_trait]
impl DeleteStrategy for PermanentDelete {
    fn kind(&self) -> EntityKind { self.kind }

    fn mode(&self) -> DeletionMode { DeletionMode::Permanent }

    async fn apply(&self, request: DeleteRequest) -> Result<bool> {
        let txn = self.store.begin().await?;
        let result = self.store.remove_rows(&txn, self.kind, &[request.id]).await;
        match settle(txn, result).await {
            Ok(rows) => Ok(rows > 0),
            Err(err) => Err(self.explain(request.id, err).await),
        }
    }
}

pub struct CascadeDelete {
    orchestrator: Arc<dyn CascadeOrchestrator>,
}

impl CascadeDelete {
    pub fn new(orchestrator: Arc<dyn CascadeOrchestrator>) -> Self {
        Self {
            orchestrator,
        }
    }
}

#[async_trait]
impl DeleteStrategy for CascadeDelete {
    fn kind(&self) -> EntityKind { self.orchestrator.aggregate().entity() }

    fn mode(&self) -> DeletionMode { DeletionMode::Cascade }

    async fn apply(&self, request: DeleteRequest) -> Result<bool> {
        self.orchestrator
            .apply_cascade(request.id, request.acting_user_id)
            .await
    }

    fn as_cascade(&self) -> Option<&dyn CascadeOrchestrator> { Some(self.orchestrator.as_ref()) }
}
