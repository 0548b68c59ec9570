//! Administrator account commands.

use clap::{Args, Subcommand};

use coursehub_core::config::AppConfig;
use coursehub_core::error::AppError;
use coursehub_database::repositories::{AcademicYearRepository, RoleRepository};

use crate::output;

/// Name of the seeded role holding every permission.
const ADMIN_ROLE: &str = "Admin";

/// Arguments for admin commands
#[derive(Debug, Args)]
pub struct AdminArgs {
    /// Admin subcommand
    #[command(subcommand)]
    pub command: AdminCommand,
}

/// Admin subcommands
#[derive(Debug, Subcommand)]
pub enum AdminCommand {
    /// Create an account holding the Admin role in the current academic year
    Create {
        /// Login
        #[arg(short, long)]
        login: String,
        /// Password (will prompt if not provided)
        #[arg(short, long)]
        password: Option<String>,
    },
}

/// Execute admin commands
pub async fn execute(args: &AdminArgs, config: AppConfig) -> Result<(), AppError> {
    let state = super::build_state(config).await?;
    let years = AcademicYearRepository::new(state.db.pool().clone());
    let roles = RoleRepository::new(state.db.pool().clone());

    match &args.command {
        AdminCommand::Create { login, password } => {
            let year = years.find_current().await?.ok_or_else(|| {
                AppError::validation(
                    "No current academic year; run `coursehub-cli year create <year> --current` first",
                )
            })?;
            let role = roles
                .find_by_name(ADMIN_ROLE)
                .await?
                .ok_or_else(|| AppError::not_found("Admin role is missing; run migrations"))?;

            let password = match password {
                Some(p) => p.clone(),
                None => dialoguer::Password::new()
                    .with_prompt("Admin password")
                    .with_confirmation("Confirm password", "Passwords do not match")
                    .interact()
                    .map_err(|e| AppError::internal(format!("Input error: {e}")))?,
            };

            let account = state.account_service.register(login, &password).await?;
            state
                .account_service
                .assign_role(account.id, year.year, role.id)
                .await?;

            output::print_success(&format!(
                "Admin account '{}' created for {} (id: {})",
                account.login,
                year.label(),
                account.id
            ));
        }
    }

    state.db.close().await;
    Ok(())
}
