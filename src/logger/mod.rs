//! Logging setup based on `tracing-subscriber`.
//!
//! Console output with optional colors plus an optional file sink in
//! full, compact or JSON format. The filter comes from `RUST_LOG` when set,
//! otherwise from the configured level.

pub mod config;
pub mod error;

pub use config::{ConsoleConfig, FileConfig, LogFormat, LoggerConfig};
pub use error::LoggerError;

use std::fs::{self, File, OpenOptions};
use std::io::IsTerminal;
use std::sync::Mutex;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{Layer, Registry, fmt};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Installs the global subscriber.
///
/// # Errors
///
/// `LoggerError::Config` for an invalid configuration, `Io` when the log
/// file cannot be opened and `AlreadyInitialized` on a second call.
pub fn init_logger(config: &LoggerConfig) -> Result<(), LoggerError> {
    config.validate()?;
    let filter = config.env_filter()?;

    // The file layer goes first so console ANSI settings do not leak into
    // span fields written to the file.
    let mut layers: Vec<BoxedLayer> = Vec::new();
    if config.file.enabled {
        layers.push(file_layer(&config.file)?);
    }
    if config.console.enabled {
        layers.push(console_layer(&config.console));
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(filter)
        .try_init()
        .map_err(|e| LoggerError::AlreadyInitialized(e.to_string()))
}

fn console_layer(config: &ConsoleConfig) -> BoxedLayer {
    let use_ansi = config.colored && std::io::stdout().is_terminal();
    fmt::layer()
        .with_ansi(use_ansi)
        .with_target(true)
        .with_level(true)
        .boxed()
}

fn file_layer(config: &FileConfig) -> Result<BoxedLayer, LoggerError> {
    let writer = Mutex::new(open_log_file(config)?);
    let layer = fmt::layer().with_ansi(false).with_writer(writer);

    Ok(match config.format {
        LogFormat::Full => layer.with_target(true).boxed(),
        LogFormat::Compact => layer.with_target(true).compact().boxed(),
        LogFormat::Json => layer.json().boxed(),
    })
}

/// Opens the log file, creating parent directories. Truncates unless
/// `append` is set.
pub(crate) fn open_log_file(config: &FileConfig) -> Result<File, LoggerError> {
    if let Some(parent) = config.path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut options = OpenOptions::new();
    options.create(true);
    if config.append {
        options.append(true);
    } else {
        options.write(true).truncate(true);
    }
    Ok(options.open(&config.path)?)
}

/// Maps the CLI verbosity flags onto a level, keeping the configured one
/// when neither is given.
pub fn level_for_flags(configured: &str, verbose: u8, quiet: bool) -> String {
    if quiet {
        return "error".to_string();
    }
    match verbose {
        0 => configured.to_string(),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::path::PathBuf;

    use tempfile::TempDir;

    use super::*;

    fn filter_for(level: &str) -> Result<(), LoggerError> {
        LoggerConfig::default().with_level(level).validate()
    }

    fn file_config(dir: &TempDir, append: bool) -> FileConfig {
        FileConfig {
            enabled: true,
            path: dir.path().join("nested").join("jobboard.log"),
            append,
            format: LogFormat::Json,
        }
    }

    #[test]
    fn default_config_is_valid() {
        assert!(LoggerConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_config_without_outputs() {
        let config = LoggerConfig {
            console: ConsoleConfig {
                enabled: false,
                colored: false,
            },
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(LoggerError::Config { .. })));
    }

    #[test]
    fn rejects_enabled_file_without_path() {
        let config = LoggerConfig {
            file: FileConfig {
                enabled: true,
                path: PathBuf::new(),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn accepts_directives_and_rejects_bad_levels() {
        assert!(filter_for("info").is_ok());
        assert!(filter_for("jobboard=debug,diesel=warn").is_ok());
        assert!(filter_for("jobboard=shouting").is_err());
    }

    #[test]
    fn log_format_parsing() {
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("compact".parse::<LogFormat>().unwrap(), LogFormat::Compact);
        assert_eq!(LogFormat::Full.to_string(), "full");
        assert!("yaml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn open_log_file_creates_parents_and_truncates() {
        let dir = TempDir::new().unwrap();
        let config = file_config(&dir, false);

        let mut file = open_log_file(&config).unwrap();
        file.write_all(b"first run\n").unwrap();
        drop(file);

        let mut file = open_log_file(&config).unwrap();
        file.write_all(b"second\n").unwrap();
        drop(file);

        assert_eq!(fs::read_to_string(&config.path).unwrap(), "second\n");
    }

    #[test]
    fn open_log_file_appends_when_asked() {
        let dir = TempDir::new().unwrap();
        let config = file_config(&dir, true);

        for line in ["a\n", "b\n"] {
            let mut file = open_log_file(&config).unwrap();
            file.write_all(line.as_bytes()).unwrap();
        }

        assert_eq!(fs::read_to_string(&config.path).unwrap(), "a\nb\n");
    }

    #[test]
    fn verbosity_flags_pick_level() {
        assert_eq!(level_for_flags("warn", 0, false), "warn");
        assert_eq!(level_for_flags("warn", 1, false), "debug");
        assert_eq!(level_for_flags("warn", 3, false), "trace");
        assert_eq!(level_for_flags("info", 2, true), "error");
    }
}
