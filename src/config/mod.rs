//! Layered configuration.
//!
//! Sources, lowest priority first:
//! 1. `default.toml`
//! 2. `{environment}.toml`, picked by `JOBBOARD_APP_ENV`
//! 3. `local.toml`
//! 4. `JOBBOARD_*` environment variables, nested keys joined with `__`
//!    (`JOBBOARD_DATABASE__URL`, `JOBBOARD_JWT__SECRET`)
//!
//! `JOBBOARD_CONFIG_FILE` replaces steps 1-3 with a single file.

pub mod environment;
pub mod error;
pub mod loader;
pub mod settings;
pub mod validation;

pub use environment::Environment;
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use settings::{
    ApplicationConfig, ConsoleSettings, DatabaseConfig, FileSettings, JwtConfig, LoggerSettings,
    Settings,
};
