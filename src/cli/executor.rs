//! Dispatches a parsed command line to its handler.

use super::handlers::{
    AdminCommandHandler, CheckCommandHandler, MigrateCommandHandler, TokenCommandHandler,
};
use super::parser::{Cli, Commands};
use crate::config::{ConfigLoader, Settings};
use crate::error::{AppError, AppResult};
use crate::logger::{LoggerError, init_logger, level_for_flags};
use crate::state::AppState;

/// Builds the config loader, honoring `--config` and `--env`.
pub fn config_loader(cli: &Cli) -> AppResult<ConfigLoader> {
    let mut loader = ConfigLoader::new()?;
    if let Some(path) = &cli.config {
        loader = loader.with_config_file(path);
    }
    if let Some(env) = cli.env {
        loader = loader.with_environment(env.into());
    }
    Ok(loader)
}

/// Runs the command. Everything except `check` needs valid settings and
/// installs the logger first.
pub async fn execute_command(cli: &Cli, loader: ConfigLoader) -> AppResult<()> {
    let settings = match &cli.command {
        Commands::Check => return run_check(loader),
        _ => prepare(cli, &loader)?,
    };

    match &cli.command {
        Commands::Migrate { dry_run, rollback } => {
            MigrateCommandHandler::new(settings.database)
                .execute(*dry_run, *rollback)
                .await
        }
        Commands::Token(command) => {
            let output = TokenCommandHandler::from_config(&settings.jwt).execute(command)?;
            println!("{output}");
            Ok(())
        }
        command => {
            let output = run_admin(command, &settings).await?;
            println!("{output}");
            Ok(())
        }
    }
}

fn run_check(loader: ConfigLoader) -> AppResult<()> {
    let report = CheckCommandHandler::new(loader).execute()?;
    println!("{report}");
    match report.problems.into_iter().next() {
        Some(problem) => Err(problem.into()),
        None => Ok(()),
    }
}

fn prepare(cli: &Cli, loader: &ConfigLoader) -> AppResult<Settings> {
    let settings = loader.load()?;

    let level = level_for_flags(&settings.logger.level, cli.verbose, cli.quiet);
    let logger_config = settings.logger.to_logger_config()?.with_level(level);
    match init_logger(&logger_config) {
        Ok(()) => {}
        // A subscriber installed by an embedding process or a test wins.
        Err(LoggerError::AlreadyInitialized(_)) => {}
        Err(e) => {
            return Err(AppError::Configuration {
                key: "logger".to_string(),
                source: anyhow::Error::new(e),
            });
        }
    }

    tracing::debug!(
        environment = %loader.environment(),
        app = %settings.application.name,
        version = %settings.application.version,
        "Settings loaded"
    );
    Ok(settings)
}

async fn run_admin(command: &Commands, settings: &Settings) -> AppResult<String> {
    if settings.database.auto_migrate {
        MigrateCommandHandler::new(settings.database.clone())
            .run_migrations()
            .await?;
    }

    let state = AppState::connect(settings).await?;
    let admin = AdminCommandHandler::new(state.services);
    match command {
        Commands::Company(command) => admin.company(command).await,
        Commands::University(command) => admin.university(command).await,
        Commands::Vacancy(command) => admin.vacancy(command).await,
        Commands::Response(command) => admin.response(command).await,
        Commands::Check | Commands::Migrate { .. } | Commands::Token(_) => Err(AppError::Internal {
            source: anyhow::anyhow!("not an admin command"),
        }),
    }
}
