//! Command-line interface: argument parsing, validation and dispatch to
//! the command handlers.

pub mod executor;
pub mod handlers;
pub mod parser;
pub mod validation;

pub use executor::{config_loader, execute_command};
pub use parser::{Cli, Commands};

use crate::error::AppResult;

/// Entry point used by the binary.
pub async fn run(cli: Cli) -> AppResult<()> {
    let loader = config_loader(&cli)?;
    execute_command(&cli, loader).await
}
