//! Storage operations consumed by the lifecycle engine.

mod sea;

use async_trait::async_trait;
use error::Result;
use sea_orm::DatabaseTransaction;
pub use sea::SeaStore;

use crate::{
    graph::SubtreeGraph,
    kinds::{AggregateKind, EntityKind},
};

/// Largest id list bound into a single `IN (...)` clause.
///
/// Longer lists are split so a statement stays under the driver's bind limit
/// (65,535 on PostgreSQL, 32,766 on older SQLite builds).
pub const BATCH_SIZE: usize = 1_000;

/// Abstract storage used by strategies and cascade orchestrators.
///
/// Every write takes the transaction explicitly; implementations never open
/// one implicitly. Committing or rolling back is the caller's job.
#[async_trait]
pub trait LifecycleStore: Send + Sync {
    /// Open a transaction.
    async fn begin(&self) -> Result<DatabaseTransaction>;

    /// Materialize an aggregate and everything it owns.
    ///
    /// Returns `None` when the root row does not exist. An inactive root is
    /// returned with its `active` flag unset and no descendants loaded.
    async fn load_subtree(
        &self,
        txn: &DatabaseTransaction,
        root: AggregateKind,
        root_id: i32,
    ) -> Result<Option<SubtreeGraph>>;

    /// Batch hard delete, issued in chunks of [`BATCH_SIZE`]. Returns the number of rows removed.
    async fn remove_rows(&self, txn: &DatabaseTransaction, kind: EntityKind, ids: &[i32]) -> Result<u64>;

    /// Batch soft-disable, issued in chunks of [`BATCH_SIZE`]. Returns the number of rows matched.
    async fn set_active_false(&self, txn: &DatabaseTransaction, kind: EntityKind, ids: &[i32]) -> Result<u64>;

    /// Flush pending mutations inside the transaction.
    ///
    /// Writes are issued eagerly by the SeaORM store, so the default is a no-op.
    async fn save_all(&self, _txn: &DatabaseTransaction) -> Result<()> { Ok(()) }

    /// The `active` flag of a row, or `None` if it does not exist.
    async fn find_active(&self, txn: &DatabaseTransaction, kind: EntityKind, id: i32) -> Result<Option<bool>>;

    /// Relations (`table.column`) that still reference the row.
    async fn dependents_of(&self, kind: EntityKind, id: i32) -> Result<Vec<String>>;
}
