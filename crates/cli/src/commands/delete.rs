//! # CLI Delete Command
//!
//! Runs a logical, permanent or cascade deletion through the lifecycle service.

use error::{Result, ResultExt};
use lifecycle::{CascadeReport, DeletionMode, EntityKind, LifecycleService};
use migration::DatabaseConfig;
use serde::Serialize;
use tracing::info;

use crate::{commands::DeleteArgs, config::redact};

/// What a delete command did.
#[derive(Debug, Serialize)]
pub struct DeleteOutcome {
    pub entity:  EntityKind,
    pub id:      i32,
    pub mode:    DeletionMode,
    pub deleted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report:  Option<CascadeReport>,
}

/// Connects, deletes and prints the outcome
///
/// # Errors
///
/// Returns an error if the connection fails or the deletion is rejected or rolled back.
pub async fn delete(config: &DatabaseConfig, args: DeleteArgs) -> Result<()> {
    info!(
        target: "delete",
        database = %redact(&config.build_connection_string()),
        entity = %args.entity,
        id = args.id,
        mode = %args.mode,
        "Connecting to database..."
    );

    let db = config.connect().await?;
    let service = LifecycleService::from_connection(db.inner);
    let outcome = run(&service, &args).await?;

    if args.json {
        let json = serde_json::to_string_pretty(&outcome).context("Failed to serialize outcome")?;
        println!("{}", json);
    }
    else {
        print!("{}", render(&outcome));
    }
    Ok(())
}

/// Cascades on an aggregate root keep their report; every other request goes through the resolver.
pub async fn run(service: &LifecycleService, args: &DeleteArgs) -> Result<DeleteOutcome> {
    let report = match (args.mode, args.entity.aggregate()) {
        (DeletionMode::Cascade, Some(aggregate)) => {
            service
                .cascade(aggregate, args.id, args.acting_user)
                .await?
        },
        _ => {
            let deleted = service
                .delete(args.entity, args.id, args.mode, args.acting_user)
                .await?;
            return Ok(DeleteOutcome {
                entity: args.entity,
                id: args.id,
                mode: args.mode,
                deleted,
                report: None,
            });
        },
    };

    Ok(DeleteOutcome {
        entity: args.entity,
        id: args.id,
        mode: args.mode,
        deleted: report.is_some(),
        report,
    })
}

fn render(outcome: &DeleteOutcome) -> String {
    if !outcome.deleted {
        return format!(
            "Nothing to delete: {} {} is missing or already inactive\n",
            outcome.entity, outcome.id
        );
    }

    let mut out = format!("Deleted {} {} ({})\n", outcome.entity, outcome.id, outcome.mode);
    if let Some(report) = &outcome.report {
        out.push_str(&format!("  operation: {}\n", report.operation_id));
        for (kind, rows) in &report.removed {
            out.push_str(&format!("  removed {:<18} {}\n", kind.to_string(), rows));
        }
        out.push_str(&format!("  deactivated users  {}\n", report.deactivated_users));
    }
    out
}

#[cfg(test)]
mod tests {
    use lifecycle::AggregateKind;

    use super::*;

    async fn service() -> LifecycleService {
        let db = DatabaseConfig::new()
            .with_url("sqlite::memory:")
            .with_pool_size(1)
            .connect()
            .await
            .unwrap();
        db.migrate().await.unwrap();
        LifecycleService::from_connection(db.inner)
    }

    fn args(entity: EntityKind, mode: DeletionMode) -> DeleteArgs {
        DeleteArgs {
            entity,
            id: 99,
            mode,
            acting_user: Some(1),
            json: false,
        }
    }

    #[tokio::test]
    async fn test_missing_row_is_not_deleted() {
        let service = service().await;

        let outcome = run(&service, &args(EntityKind::Item, DeletionMode::Logical))
            .await
            .unwrap();
        assert!(!outcome.deleted);
        assert!(outcome.report.is_none());

        let outcome = run(&service, &args(EntityKind::Zone, DeletionMode::Cascade))
            .await
            .unwrap();
        assert!(!outcome.deleted);
        assert!(outcome.report.is_none());
    }

    #[tokio::test]
    async fn test_unregistered_pair_is_a_config_error() {
        let service = service().await;

        let err = run(&service, &args(EntityKind::Company, DeletionMode::Permanent))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "CONFIG_ERROR");
    }

    #[test]
    fn test_render_cascade_report() {
        let mut report = CascadeReport::new("op1", AggregateKind::Zone, 4, Some(1));
        report.removed.insert(EntityKind::Item, 3);
        report.removed.insert(EntityKind::Zone, 1);
        report.deactivated_users = 1;

        let text = render(&DeleteOutcome {
            entity:  EntityKind::Zone,
            id:      4,
            mode:    DeletionMode::Cascade,
            deleted: true,
            report:  Some(report),
        });
        assert!(text.starts_with("Deleted zone 4 (cascade)\n"));
        assert!(text.contains("operation: op1"));
        assert!(text.contains("removed item"));
        assert!(text.contains("deactivated users  1"));
    }

    #[test]
    fn test_outcome_json_omits_missing_report() {
        let outcome = DeleteOutcome {
            entity:  EntityKind::InventoryDetail,
            id:      5,
            mode:    DeletionMode::Permanent,
            deleted: true,
            report:  None,
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["entity"], "inventory_detail");
        assert_eq!(json["mode"], "permanent");
        assert_eq!(json["deleted"], true);
        assert!(json.get("report").is_none());
    }

    #[test]
    fn test_render_nothing_deleted() {
        let text = render(&DeleteOutcome {
            entity:  EntityKind::Branch,
            id:      2,
            mode:    DeletionMode::Logical,
            deleted: false,
            report:  None,
        });
        assert_eq!(text, "Nothing to delete: branch 2 is missing or already inactive\n");
    }
}
