//! Academic year commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use coursehub_core::config::AppConfig;
use coursehub_core::error::AppError;
use coursehub_database::repositories::AcademicYearRepository;
use coursehub_entity::academic_year::AcademicYear;
use coursehub_service::academic_year::service::CreateAcademicYearRequest;

use crate::output::{self, OutputFormat};

/// Arguments for year commands
#[derive(Debug, Args)]
pub struct YearArgs {
    /// Year subcommand
    #[command(subcommand)]
    pub command: YearCommand,
}

/// Year subcommands
#[derive(Debug, Subcommand)]
pub enum YearCommand {
    /// List academic years
    List,
    /// Open an academic year and create its root node
    Create {
        /// Starting calendar year (2024 for 2024-2025)
        year: i32,
        /// Free-form description
        #[arg(short, long)]
        description: Option<String>,
        /// Make it the current year
        #[arg(long)]
        current: bool,
    },
}

#[derive(Debug, Serialize, Tabled)]
struct YearRow {
    year: i32,
    label: String,
    current: bool,
    description: String,
}

impl From<AcademicYear> for YearRow {
    fn from(year: AcademicYear) -> Self {
        Self {
            label: year.label(),
            year: year.year,
            current: year.is_current,
            description: year.description.unwrap_or_default(),
        }
    }
}

/// Execute year commands
pub async fn execute(
    args: &YearArgs,
    config: AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let state = super::build_state(config).await?;

    match &args.command {
        YearCommand::List => {
            let years = AcademicYearRepository::new(state.db.pool().clone())
                .find_all()
                .await?;
            let rows: Vec<YearRow> = years.into_iter().map(YearRow::from).collect();
            output::print_list(&rows, format);
        }
        YearCommand::Create {
            year,
            description,
            current,
        } => {
            let (year, root) = state
                .academic_year_service
                .open_year(CreateAcademicYearRequest {
                    year: *year,
                    description: description.clone(),
                    is_current: *current,
                })
                .await?;
            output::print_success(&format!(
                "Academic year {} opened (root node: {})",
                year.label(),
                root.id
            ));
        }
    }

    state.db.close().await;
    Ok(())
}
