//! Database migration management commands.

use clap::{Args, Subcommand};

use coursehub_core::config::AppConfig;
use coursehub_core::error::AppError;
use coursehub_database::DatabasePool;

use crate::output;

/// Arguments for the migrate command
#[derive(Debug, Args)]
pub struct MigrateArgs {
    /// Migration subcommand
    #[command(subcommand)]
    pub command: MigrateCommand,
}

/// Migration subcommands
#[derive(Debug, Subcommand)]
pub enum MigrateCommand {
    /// Run all pending migrations
    Run,
}

/// Execute migration commands
pub async fn execute(args: &MigrateArgs, config: AppConfig) -> Result<(), AppError> {
    let db = DatabasePool::connect(&config.database).await?;

    match &args.command {
        MigrateCommand::Run => {
            println!("Running database migrations...");
            coursehub_database::migration::run_migrations(db.pool()).await?;
            output::print_success("All migrations applied successfully.");
        }
    }

    db.close().await;
    Ok(())
}
