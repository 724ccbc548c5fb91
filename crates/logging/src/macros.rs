//! # Logging Macros
//!
//! Convenience macros for structured logging.
//! These macros keep field names uniform across crates so log queries stay simple.

/// Log the outcome of one stage of a lifecycle operation.
///
/// # Example
///
/// ```rust
/// use logging::{log_cascade_stage, OperationId};
///
/// let op = OperationId::new();
/// log_cascade_stage!(op, "company", 7, "remove_items", 12);
/// ```
#[macro_export]
macro_rules! log_cascade_stage {
    ($operation_id:expr, $aggregate:expr, $root_id:expr, $stage:expr, $rows:expr) => {
        $crate::debug!(
            target: "lifecycle",
            operation_id = %$operation_id,
            aggregate = %$aggregate,
            root_id = %$root_id,
            stage = %$stage,
            rows = $rows,
            "Cascade stage applied"
        )
    };
}

/// Log a failed stage of a lifecycle operation.
#[macro_export]
macro_rules! log_cascade_failure {
    ($operation_id:expr, $aggregate:expr, $root_id:expr, $stage:expr, $err:expr) => {
        $crate::error!(
            target: "lifecycle",
            operation_id = %$operation_id,
            aggregate = %$aggregate,
            root_id = %$root_id,
            stage = %$stage,
            error = %$err,
            "Cascade stage failed, rolling back"
        )
    };
}

/// Log a batched database write with table name and row counts.
#[macro_export]
macro_rules! log_db_batch {
    ($action:expr, $table:expr, $requested:expr, $affected:expr) => {
        $crate::trace!(
            target: "database",
            action = %$action,
            table = %$table,
            requested = $requested,
            affected = $affected,
            "Database batch"
        )
    };
}

/// Measure and log the duration of a block of code.
///
/// # Example
///
/// ```rust
/// use logging::measure_duration;
///
/// let total = measure_duration!("lifecycle", "plan", { 1 + 1 });
/// assert_eq!(total, 2);
/// ```
#[macro_export]
macro_rules! measure_duration {
    ($target:expr, $context:expr, $block:block) => {{
        let start = std::time::Instant::now();
        let result = $block;
        let duration = start.elapsed();
        $crate::debug!(
            target: $target,
            context = %$context,
            duration_ms = duration.as_secs_f64() * 1000.0,
            "Operation completed"
        );
        result
    }};
}
