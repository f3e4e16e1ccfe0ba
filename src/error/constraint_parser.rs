use regex::Regex;
use std::sync::OnceLock;

/// Extracts structured information from PostgreSQL constraint violations.
///
/// Constraint names follow the PostgreSQL defaults used by the migrations:
/// `<table>_<column>_key` for unique constraints and `<table>_<column>_fkey`
/// for foreign keys. Table names are mapped to the singular entity names the
/// rest of the crate reports in errors.
pub struct ConstraintParser;

struct Patterns {
    key_value: Option<Regex>,
    referenced_table: Option<Regex>,
}

static PATTERNS: OnceLock<Patterns> = OnceLock::new();

const CONSTRAINT_SUFFIXES: [&str; 4] = ["_fkey", "_pkey", "_key", "_check"];

impl ConstraintParser {
    fn patterns() -> &'static Patterns {
        PATTERNS.get_or_init(|| Patterns {
            key_value: Regex::new(r"Key \(([^)]+)\)=\(([^)]*)\)").ok(),
            referenced_table: Regex::new(r#"not present in table "([^"]+)""#).ok(),
        })
    }

    /// Maps a table name onto the entity name used in `AppError`.
    pub fn entity_for_table(table: &str) -> String {
        match table {
            "companies" => "company".to_string(),
            "universities" => "university".to_string(),
            "vacancies" => "vacancy".to_string(),
            "responses" => "response".to_string(),
            other => other.to_string(),
        }
    }

    /// Splits a constraint name into `(entity, column)`.
    ///
    /// `companies_inn_key` becomes `("company", "inn")`,
    /// `vacancies_company_id_fkey` becomes `("vacancy", "company_id")`.
    pub fn parse_constraint_name(constraint: &str) -> Option<(String, String)> {
        let stem = CONSTRAINT_SUFFIXES
            .iter()
            .find_map(|suffix| constraint.strip_suffix(suffix))?;
        let (table, column) = stem.split_once('_')?;
        if table.is_empty() || column.is_empty() {
            return None;
        }
        Some((Self::entity_for_table(table), column.to_string()))
    }

    /// Returns `(column, value)` from a `Key (column)=(value)` detail line.
    pub fn extract_key_value(text: &str) -> Option<(String, String)> {
        let captures = Self::patterns().key_value.as_ref()?.captures(text)?;
        Some((captures[1].to_string(), captures[2].to_string()))
    }

    /// `(entity, field, value)` for a unique violation.
    pub fn parse_unique_violation(
        message: &str,
        details: Option<&str>,
        constraint_name: Option<&str>,
    ) -> Option<(String, String, String)> {
        let key_value = details
            .and_then(Self::extract_key_value)
            .or_else(|| Self::extract_key_value(message));

        match (constraint_name.and_then(Self::parse_constraint_name), key_value) {
            (Some((entity, field)), Some((_, value))) => Some((entity, field, value)),
            (Some((entity, field)), None) => Some((entity, field, "duplicate_value".to_string())),
            (None, Some((field, value))) => Some(("resource".to_string(), field, value)),
            (None, None) => None,
        }
    }

    /// `(referenced entity, field, value)` for a foreign key violation.
    ///
    /// The entity is the referenced table when PostgreSQL names it, since a
    /// dangling reference means that row does not exist.
    pub fn parse_foreign_key_violation(
        message: &str,
        details: Option<&str>,
        constraint_name: Option<&str>,
    ) -> Option<(String, String, String)> {
        let text = details.unwrap_or(message);
        let (field, value) = Self::extract_key_value(text)?;
        let entity = Self::patterns()
            .referenced_table
            .as_ref()
            .and_then(|re| re.captures(text))
            .map(|captures| Self::entity_for_table(&captures[1]))
            .or_else(|| {
                constraint_name
                    .and_then(Self::parse_constraint_name)
                    .map(|(entity, _)| entity)
            })
            .unwrap_or_else(|| "resource".to_string());
        Some((entity, field, value))
    }
}
