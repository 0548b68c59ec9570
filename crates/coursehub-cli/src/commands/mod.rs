//! CLI command definitions and dispatch.

pub mod admin;
pub mod migrate;
pub mod year;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use coursehub_api::AppState;
use coursehub_cache::CacheManager;
use coursehub_cache::memory::MemoryCacheProvider;
use coursehub_core::config::AppConfig;
use coursehub_core::error::AppError;
use coursehub_database::DatabasePool;

use crate::output::OutputFormat;

/// CourseHub course-management administration
#[derive(Debug, Parser)]
#[command(name = "coursehub-cli", version, about, long_about = None)]
pub struct Cli {
    /// Configuration environment (selects `config/{env}.toml`)
    #[arg(short, long, default_value = "development", env = "COURSEHUB_ENV")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// Administrator accounts
    Admin(admin::AdminArgs),
    /// Academic years
    Year(year::YearArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        let config = AppConfig::load(&self.env)?;
        match &self.command {
            Commands::Migrate(args) => migrate::execute(args, config).await,
            Commands::Admin(args) => admin::execute(args, config).await,
            Commands::Year(args) => year::execute(args, config, self.format).await,
        }
    }
}

/// Helper: open the pool and wire services against it.
///
/// Commands never verify tokens, so an in-process revocation cache is
/// enough here.
pub async fn build_state(config: AppConfig) -> Result<AppState, AppError> {
    let db = DatabasePool::connect(&config.database).await?;
    let cache = Arc::new(CacheManager::from_provider(Arc::new(
        MemoryCacheProvider::new(&config.cache.memory),
    )));
    AppState::build(config, db, cache)
}
