//! Value parsers for CLI arguments clap cannot check on its own.

use std::fs;
use std::path::PathBuf;

use crate::domain::{ResponseStatus, Role};

/// Largest page an admin command may request.
pub const MAX_PAGE_SIZE: i64 = 500;

/// The file must exist, be a regular file and be readable.
pub fn validate_config_file_path(path_str: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(path_str);

    if !path.exists() {
        return Err(format!("Configuration file does not exist: '{path_str}'"));
    }

    if !path.is_file() {
        return Err(format!("Configuration path is not a file: '{path_str}'"));
    }

    fs::File::open(&path)
        .map(|_| path)
        .map_err(|e| format!("Cannot read configuration file '{path_str}': {e}"))
}

/// 1 to 100 steps.
pub fn validate_rollback_steps(steps_str: &str) -> Result<u32, String> {
    let steps: u32 = steps_str
        .parse()
        .map_err(|_| format!("Rollback steps must be a positive number, got: '{steps_str}'"))?;

    match steps {
        0 => Err("Rollback steps must be greater than 0".to_string()),
        101.. => Err("Rollback steps cannot exceed 100".to_string()),
        _ => Ok(steps),
    }
}

pub fn validate_page_limit(limit_str: &str) -> Result<i64, String> {
    let limit: i64 = limit_str
        .parse()
        .map_err(|_| format!("Limit must be a number, got: '{limit_str}'"))?;

    if !(1..=MAX_PAGE_SIZE).contains(&limit) {
        return Err(format!("Limit must be between 1 and {MAX_PAGE_SIZE}"));
    }
    Ok(limit)
}

pub fn parse_role(value: &str) -> Result<Role, String> {
    value
        .parse()
        .map_err(|_| format!("Unknown role '{value}'. Expected company, university or admin"))
}

pub fn parse_response_status(value: &str) -> Result<ResponseStatus, String> {
    value.parse().map_err(|_| {
        format!("Unknown status '{value}'. Expected new, viewed, rejected or accepted")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn config_file_must_exist_and_be_a_file() {
        let file = NamedTempFile::new().unwrap();
        let path = file.path().to_str().unwrap();
        assert_eq!(validate_config_file_path(path).unwrap(), file.path());

        let dir = file.path().parent().unwrap().to_str().unwrap();
        assert!(validate_config_file_path(dir).unwrap_err().contains("not a file"));
        assert!(
            validate_config_file_path("/definitely/missing/jobboard.toml")
                .unwrap_err()
                .contains("does not exist")
        );
    }

    #[test]
    fn rollback_steps_bounds() {
        for steps in ["1", "50", "100"] {
            assert!(validate_rollback_steps(steps).is_ok(), "{steps}");
        }
        for steps in ["0", "101", "-1", "abc", ""] {
            assert!(validate_rollback_steps(steps).is_err(), "{steps}");
        }
    }

    #[test]
    fn page_limit_bounds() {
        assert_eq!(validate_page_limit("1").unwrap(), 1);
        assert_eq!(validate_page_limit("500").unwrap(), 500);
        for limit in ["0", "501", "-5", "ten"] {
            assert!(validate_page_limit(limit).is_err(), "{limit}");
        }
    }

    #[test]
    fn role_and_status_parsers() {
        assert_eq!(parse_role("admin").unwrap(), Role::Admin);
        assert!(parse_role("student").is_err());
        assert_eq!(parse_response_status("viewed").unwrap(), ResponseStatus::Viewed);
        assert!(parse_response_status("archived").unwrap_err().contains("archived"));
    }
}
