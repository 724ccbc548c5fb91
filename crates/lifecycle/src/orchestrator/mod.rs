//! # Cascade Orchestrators
//!
//! One orchestrator per aggregate type. Each loads its subtree, builds a
//! [`CascadePlan`] and applies it inside a single transaction:
//!
//! - root missing or inactive: rollback, `Ok(None)`, no writes
//! - any step fails: rollback, the error is logged with the stage and re-raised
//! - otherwise: `save_all`, commit, and a [`CascadeReport`] is returned

mod branch;
mod company;
mod zone;

use std::sync::Arc;

use async_trait::async_trait;
pub use branch::BranchCascade;
pub use company::CompanyCascade;
use error::{AppError, Result};
use logging::{log_cascade_failure, log_cascade_stage, measure_duration, OperationId};
use sea_orm::DatabaseTransaction;
use tracing::{debug, info, info_span, warn, Instrument};
pub use zone::ZoneCascade;

use crate::{
    graph::SubtreeGraph,
    kinds::AggregateKind,
    plan::{CascadePlan, CascadeReport, StepAction},
    store::LifecycleStore,
};

/// Removes an aggregate root together with its subtree.
#[async_trait]
pub trait CascadeOrchestrator: Send + Sync {
    fn aggregate(&self) -> AggregateKind;

    /// Run the cascade. `Ok(None)` means the root was missing or already inactive.
    async fn run(&self, root_id: i32, acting_user_id: Option<i32>) -> Result<Option<CascadeReport>>;

    /// `true` if the subtree was removed, `false` if there was nothing to remove.
    async fn apply_cascade(&self, root_id: i32, acting_user_id: Option<i32>) -> Result<bool> {
        Ok(self.run(root_id, acting_user_id).await?.is_some())
    }
}

/// Shared transaction handling for every aggregate type.
pub(crate) async fn execute<F>(
    store: &Arc<dyn LifecycleStore>,
    aggregate: AggregateKind,
    root_id: i32,
    acting_user_id: Option<i32>,
    plan: F,
) -> Result<Option<CascadeReport>>
where
    F: FnOnce(SubtreeGraph) -> Result<CascadePlan> + Send,
{
    let operation_id = OperationId::new();
    let span = info_span!(
        "cascade",
        operation_id = %operation_id,
        aggregate = %aggregate,
        root_id,
        acting_user_id = ?acting_user_id
    );

    async move {
        let txn = store.begin().await?;

        let graph = match store.load_subtree(&txn, aggregate, root_id).await {
            Ok(Some(graph)) if graph.root_active() => graph,
            Ok(_) => {
                debug!("Root missing or inactive, nothing to remove");
                rollback(txn).await;
                return Ok(None);
            },
            Err(err) => return Err(abort(txn, &operation_id, aggregate, root_id, "load_subtree", err).await),
        };

        let planned = measure_duration!("lifecycle", "plan", { plan(graph) });
        let plan = match planned {
            Ok(plan) => plan,
            Err(err) => return Err(abort(txn, &operation_id, aggregate, root_id, "plan", err).await),
        };

        let mut report = CascadeReport::new(&operation_id, aggregate, root_id, acting_user_id);
        for step in &plan.steps {
            let stage = step.stage();
            let applied = match step.action {
                StepAction::Remove => store.remove_rows(&txn, step.kind, &step.ids).await,
                StepAction::Deactivate => store.set_active_false(&txn, step.kind, &step.ids).await,
            };
            let rows = match applied {
                Ok(rows) if step.action == StepAction::Remove && rows != step.ids.len() as u64 => {
                    let err = AppError::retryable_conflict(format!(
                        "{} changed concurrently: expected {} rows, removed {}",
                        step.kind.table_name(),
                        step.ids.len(),
                        rows
                    ));
                    return Err(abort(txn, &operation_id, aggregate, root_id, &stage, err).await);
                },
                Ok(rows) => rows,
                Err(err) => return Err(abort(txn, &operation_id, aggregate, root_id, &stage, err).await),
            };
            log_cascade_stage!(operation_id, aggregate, root_id, stage, rows);
            report.record(step, rows);
        }

        if let Err(err) = store.save_all(&txn).await {
            return Err(abort(txn, &operation_id, aggregate, root_id, "save_all", err).await);
        }
        if let Err(err) = txn.commit().await {
            let err = escalate(aggregate, root_id, "commit", err.into());
            log_cascade_failure!(operation_id, aggregate, root_id, "commit", err);
            return Err(err);
        }

        info!(
            removed = report.total_removed(),
            deactivated_users = report.deactivated_users,
            "Cascade committed"
        );
        Ok(Some(report))
    }
    .instrument(span)
    .await
}

/// Roll back, log the failed stage and classify the error for the caller.
async fn abort(
    txn: DatabaseTransaction,
    operation_id: &OperationId,
    aggregate: AggregateKind,
    root_id: i32,
    stage: &str,
    err: AppError,
) -> AppError {
    log_cascade_failure!(operation_id, aggregate, root_id, stage, err);
    rollback(txn).await;
    escalate(aggregate, root_id, stage, err)
}

async fn rollback(txn: DatabaseTransaction) {
    if let Err(err) = txn.rollback().await {
        warn!(error = %err, "Rollback failed");
    }
}

/// Lost races stay retryable conflicts; everything else is a transaction failure.
fn escalate(aggregate: AggregateKind, root_id: i32, stage: &str, err: AppError) -> AppError {
    if err.is_retryable() {
        return err.context(format!("{} {} cascade ({})", aggregate, root_id, stage));
    }
    AppError::transaction_failure(format!(
        "{} {} cascade rolled back at {}: {}",
        aggregate,
        root_id,
        stage,
        err.message()
    ))
}

/// Error for a store that returned a graph of the wrong shape.
pub(crate) fn unexpected_shape(expected: AggregateKind, graph: &SubtreeGraph) -> AppError {
    AppError::internal(format!(
        "expected a {} subtree, store returned a {} subtree",
        expected,
        graph.aggregate()
    ))
}
