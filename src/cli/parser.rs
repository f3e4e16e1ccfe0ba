//! Command-line interface definition.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use uuid::Uuid;

use crate::build;
use crate::domain::{ResponseStatus, Role};
use crate::services::DEFAULT_PAGE_SIZE;

/// Administration tool for the job board
#[derive(Parser, Debug)]
#[command(name = "jobboard")]
#[command(about = "Administration tool for the job board")]
#[command(long_about = "
jobboard manages the job board database: schema migrations, company approval,
university confirmation, vacancy moderation, response review and bearer tokens.
Administrative commands act as the built-in admin.

EXAMPLES:
    # Validate configuration
    jobboard check

    # Apply pending migrations, or preview them
    jobboard migrate
    jobboard migrate --dry-run

    # Approve a company
    jobboard company approve 6f1c2b6e-0d7a-4c55-9d9c-2f4b2a1f3e11

    # Companies waiting for approval
    jobboard company list --state pending

    # Active remote vacancies
    jobboard vacancy search --schedule remote --active true

    # Issue a token for a university
    jobboard token issue 1b9d6bcd-bbfd-4b2d-9b5d-ab8dfbbd4bed --role university
")]
#[command(version = build::CLAP_LONG_VERSION)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Single configuration file instead of the layered config directory
    #[arg(short, long, global = true, value_name = "FILE", value_parser = super::validation::validate_config_file_path)]
    pub config: Option<PathBuf>,

    /// Override JOBBOARD_APP_ENV
    #[arg(short, long, global = true, value_enum)]
    pub env: Option<EnvArg>,

    /// Raise log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate configuration and report every problem found
    Check,

    /// Database migration operations
    ///
    /// Examples:
    ///   jobboard migrate                # Apply all pending migrations
    ///   jobboard migrate --dry-run      # Show pending migrations without applying
    ///   jobboard migrate --rollback 1   # Revert the last migration
    Migrate {
        /// Show pending migrations without applying
        #[arg(long, conflicts_with = "rollback")]
        dry_run: bool,

        /// Number of most recent migrations to revert (1-100)
        #[arg(long, value_name = "STEPS", value_parser = super::validation::validate_rollback_steps)]
        rollback: Option<u32>,
    },

    /// Company moderation
    #[command(subcommand)]
    Company(CompanyCommand),

    /// University moderation
    #[command(subcommand)]
    University(UniversityCommand),

    /// Vacancy listing and moderation
    #[command(subcommand)]
    Vacancy(VacancyCommand),

    /// Candidate response review
    #[command(subcommand)]
    Response(ResponseCommand),

    /// Bearer token utilities
    #[command(subcommand)]
    Token(TokenCommand),
}

#[derive(Args, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageArgs {
    /// Page size
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE, value_parser = super::validation::validate_page_limit)]
    pub limit: i64,

    /// Records to skip
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(i64).range(0..))]
    pub offset: i64,
}

impl Default for PageArgs {
    fn default() -> Self {
        Self {
            limit: DEFAULT_PAGE_SIZE,
            offset: 0,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum CompanyCommand {
    /// Approve a registered company
    Approve { id: Uuid },
    /// Print one company as JSON
    Show { id: Uuid },
    /// List companies, newest first
    List {
        #[arg(long, value_enum, default_value_t = ApprovalState::All)]
        state: ApprovalState,
        #[command(flatten)]
        page: PageArgs,
    },
}

#[derive(Subcommand, Debug)]
pub enum UniversityCommand {
    /// Confirm a university account
    Confirm { id: Uuid },
    /// List universities, newest first
    List {
        #[command(flatten)]
        page: PageArgs,
    },
}

#[derive(Subcommand, Debug)]
pub enum VacancyCommand {
    /// List vacancies, optionally of one company
    List {
        #[arg(long)]
        company: Option<Uuid>,
        #[command(flatten)]
        page: PageArgs,
    },
    /// Search vacancies; every given option must match exactly
    Search {
        #[arg(long)]
        company: Option<Uuid>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        employment: Option<String>,
        #[arg(long)]
        schedule: Option<String>,
        #[arg(long)]
        experience: Option<String>,
        #[arg(long)]
        education: Option<String>,
        #[arg(long)]
        active: Option<bool>,
        #[command(flatten)]
        page: PageArgs,
    },
    /// Reopen a vacancy
    Activate { id: Uuid },
    /// Close a vacancy
    Deactivate { id: Uuid },
}

#[derive(Subcommand, Debug)]
pub enum ResponseCommand {
    /// Move a response to another status (new, viewed, rejected, accepted)
    Status {
        id: Uuid,
        #[arg(value_parser = super::validation::parse_response_status)]
        status: ResponseStatus,
    },
    /// List responses, optionally filtered by vacancy and status
    List {
        #[arg(long)]
        vacancy: Option<Uuid>,
        #[arg(long, value_parser = super::validation::parse_response_status)]
        status: Option<ResponseStatus>,
        #[command(flatten)]
        page: PageArgs,
    },
}

#[derive(Subcommand, Debug)]
pub enum TokenCommand {
    /// Issue a bearer token for a subject
    Issue {
        subject: Uuid,
        #[arg(long, value_parser = super::validation::parse_role)]
        role: Role,
    },
    /// Validate a token and print its subject and role
    Inspect { token: String },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApprovalState {
    All,
    Approved,
    Pending,
}

impl ApprovalState {
    pub fn as_filter(self) -> Option<bool> {
        match self {
            ApprovalState::All => None,
            ApprovalState::Approved => Some(true),
            ApprovalState::Pending => Some(false),
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnvArg {
    #[value(name = "development", alias = "dev")]
    Development,
    #[value(name = "test")]
    Test,
    #[value(name = "staging", alias = "stage")]
    Staging,
    #[value(name = "production", alias = "prod")]
    Production,
}

impl From<EnvArg> for crate::config::Environment {
    fn from(env: EnvArg) -> Self {
        match env {
            EnvArg::Development => crate::config::Environment::Development,
            EnvArg::Test => crate::config::Environment::Test,
            EnvArg::Staging => crate::config::Environment::Staging,
            EnvArg::Production => crate::config::Environment::Production,
        }
    }
}

impl Commands {
    /// Whether the command needs a database connection.
    pub fn needs_database(&self) -> bool {
        !matches!(self, Commands::Check | Commands::Token(_))
    }
}
