//! `check`: loads configuration and reports every invalid section.

use std::fmt;

use crate::config::{ConfigError, ConfigLoader, Environment, Settings};
use crate::error::AppResult;

/// Outcome of a configuration check.
#[derive(Debug)]
pub struct CheckReport {
    pub environment: Environment,
    pub source: String,
    pub settings: Settings,
    pub problems: Vec<ConfigError>,
}

impl CheckReport {
    pub fn is_valid(&self) -> bool {
        self.problems.is_empty()
    }
}

impl fmt::Display for CheckReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Environment: {}", self.environment)?;
        writeln!(f, "Source:      {}", self.source)?;
        if self.is_valid() {
            let database = &self.settings.database;
            writeln!(
                f,
                "✓ Database pool: {}..{} connections",
                database.min_connections, database.max_connections
            )?;
            writeln!(f, "✓ Tokens expire after {}h", self.settings.jwt.token_expiration)?;
            writeln!(f, "✓ Logger level: {}", self.settings.logger.level)?;
            return write!(f, "Configuration is valid");
        }
        for problem in &self.problems {
            writeln!(f, "✗ {problem}")?;
        }
        write!(f, "{} problem(s) found", self.problems.len())
    }
}

pub struct CheckCommandHandler {
    loader: ConfigLoader,
}

impl CheckCommandHandler {
    pub fn new(loader: ConfigLoader) -> Self {
        Self { loader }
    }

    /// Fails only when the sources cannot be read or deserialized; invalid
    /// values end up in the report.
    pub fn execute(&self) -> AppResult<CheckReport> {
        let settings = self.loader.load_unvalidated()?;

        let checks = [
            settings.database.validate(),
            settings.jwt.validate(),
            settings.logger.validate(),
            settings.logger.to_logger_config().map(|_| ()),
        ];
        let mut problems: Vec<ConfigError> = Vec::new();
        for err in checks.into_iter().filter_map(Result::err) {
            // The logger conversion repeats logger validation failures.
            if !problems.iter().any(|p| p.to_string() == err.to_string()) {
                problems.push(err);
            }
        }

        let source = match self.loader.config_file() {
            Some(file) => file.display().to_string(),
            None => format!("{} (layered)", self.loader.config_dir().display()),
        };

        Ok(CheckReport {
            environment: self.loader.environment(),
            source,
            settings,
            problems,
        })
    }
}
