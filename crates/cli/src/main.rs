//! # Warehouse CLI
//!
//! Command-line interface for the warehouse backend.
//!
//! ## Usage
//!
//! ```bash
//! warehouse migrate                                   # Apply pending migrations
//! warehouse delete zone 12 --mode cascade --acting-user 3
//! warehouse delete item 40 --mode permanent --json
//! warehouse validate --connect                        # Check configuration and wiring
//! warehouse --help
//! ```

mod commands;
mod config;

use clap::{CommandFactory as _, Parser};
use error::{AppError, Result};

use crate::commands::Commands;

/// Warehouse inventory backend administration
#[derive(Parser, Debug)]
#[command(name = "warehouse")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short = 'L', long, global = true, env = "RUST_LOG", default_value = "info")]
    log_level: String,

    /// Log output format (json, pretty, compact)
    #[arg(short, long, global = true, env = "WAREHOUSE_LOG_FORMAT", default_value = "compact")]
    log_format: String,

    /// Also write logs to this file (daily rotation)
    #[arg(long, global = true, env = "WAREHOUSE_LOG_FILE")]
    log_file: Option<String>,

    /// Full database URL; overrides the individual WAREHOUSE_DATABASE_* settings
    #[arg(long, global = true, env = "WAREHOUSE_DATABASE_URL")]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    logging::init(&cli.log_level, &cli.log_format, cli.log_file.as_deref())
        .map_err(|e| AppError::config(format!("Failed to initialize logging: {}", e)))?;

    logging::debug!(target: "app", command = ?cli.command, "Warehouse CLI starting...");

    let database = config::database_config(cli.database_url.as_deref());

    match cli.command {
        Commands::Migrate(args) => commands::migrate::migrate(&database, args).await?,
        Commands::Delete(args) => commands::delete::delete(&database, args).await?,
        Commands::Completions(args) => commands::completions::completions(args.shell, &mut Cli::command())?,
        Commands::Validate(args) => commands::validate::validate(&database, args).await?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;
    use lifecycle::{DeletionMode, EntityKind};

    use super::*;

    #[test]
    fn test_cli_parse_delete() {
        let cli = Cli::parse_from([
            "warehouse",
            "delete",
            "branch",
            "7",
            "--mode",
            "cascade",
            "--acting-user",
            "3",
        ]);
        match cli.command {
            Commands::Delete(args) => {
                assert_eq!(args.entity, EntityKind::Branch);
                assert_eq!(args.id, 7);
                assert_eq!(args.mode, DeletionMode::Cascade);
                assert_eq!(args.acting_user, Some(3));
                assert!(!args.json);
            },
            _ => panic!("Expected Delete command"),
        }
    }

    #[test]
    fn test_cli_delete_defaults_to_logical() {
        let cli = Cli::parse_from(["warehouse", "delete", "inventory-detail", "5"]);
        match cli.command {
            Commands::Delete(args) => {
                assert_eq!(args.entity, EntityKind::InventoryDetail);
                assert_eq!(args.mode, DeletionMode::Logical);
                assert_eq!(args.acting_user, None);
            },
            _ => panic!("Expected Delete command"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_entity() {
        let result = Cli::try_parse_from(["warehouse", "delete", "pallet", "5"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_parse_validate() {
        let cli = Cli::parse_from(["warehouse", "validate", "--connect"]);
        match cli.command {
            Commands::Validate(args) => assert!(args.connect),
            _ => panic!("Expected Validate command"),
        }
    }

    #[test]
    fn test_migrate_flags_conflict() {
        let result = Cli::try_parse_from(["warehouse", "migrate", "--dry-run", "--rollback"]);
        assert!(result.is_err());

        let cli = Cli::parse_from(["warehouse", "migrate", "--rollback"]);
        match cli.command {
            Commands::Migrate(args) => assert!(args.rollback),
            _ => panic!("Expected Migrate command"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "warehouse",
            "validate",
            "--database-url",
            "sqlite::memory:",
            "-L",
            "debug",
        ]);
        assert_eq!(cli.database_url.as_deref(), Some("sqlite::memory:"));
        assert_eq!(cli.log_level, "debug");
    }

    #[test]
    fn test_cli_command_factory() {
        let cmd = Cli::command();
        assert_eq!(cmd.get_name(), "warehouse");
        cmd.debug_assert();
    }
}
