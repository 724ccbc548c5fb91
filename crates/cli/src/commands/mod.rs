//! # CLI Commands
//!
//! Implementation of CLI commands for the warehouse backend.

pub mod completions;
pub mod delete;
pub mod migrate;
pub mod validate;

use clap::{Args, Subcommand};
use lifecycle::{DeletionMode, EntityKind};

/// Available commands for the warehouse CLI
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run database migrations
    Migrate(MigrateArgs),

    /// Delete an entity (logical, permanent or cascade)
    Delete(DeleteArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),

    /// Verify configuration and deletion strategy wiring
    Validate(ValidateArgs),
}

/// Arguments for the migrate command
#[derive(Args, Debug)]
pub struct MigrateArgs {
    /// List pending migrations without applying them
    #[arg(long, conflicts_with = "rollback")]
    pub dry_run: bool,

    /// Rollback the last migration
    #[arg(long)]
    pub rollback: bool,
}

/// Arguments for the delete command
#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Entity type (company, branch, zone, item, inventory, inventory-detail, verification, checker, user,
    /// operating, operating-group, state)
    pub entity: EntityKind,

    /// Entity id
    pub id: i32,

    /// Deletion mode (logical, permanent, cascade)
    #[arg(short, long, default_value = "logical")]
    pub mode: DeletionMode,

    /// Id of the user performing the deletion; never deactivated by a cascade
    #[arg(short, long, env = "WAREHOUSE_ACTING_USER")]
    pub acting_user: Option<i32>,

    /// Print the outcome as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the completions command
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}

/// Arguments for the validate command
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Also open a connection and ping the database
    #[arg(long)]
    pub connect: bool,
}
