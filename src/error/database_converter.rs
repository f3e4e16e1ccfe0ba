use crate::error::{AppError, ConstraintParser};
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};

/// Converts Diesel errors into the crate's error taxonomy.
///
/// Unique violations become `Conflict`, foreign-key violations become
/// `NotFound` for the referenced entity and check violations become
/// `InvariantViolated`, whether or not the message names the constraint.
/// Anything else is a `Database` error, which callers classify as internal.
pub struct DatabaseErrorConverter;

impl DatabaseErrorConverter {
    /// Converts a Diesel error to an appropriate AppError variant.
    ///
    /// # Arguments
    /// * `error` - The Diesel error to convert
    /// * `operation` - Description of the database operation that failed
    ///
    /// # Returns
    /// An AppError variant appropriate for the type of database error
    pub fn convert_diesel_error(error: DieselError, operation: &str) -> AppError {
        match error {
            DieselError::DatabaseError(kind, info) => {
                Self::convert_database_error(kind, info.as_ref(), operation)
            }
            DieselError::NotFound => AppError::not_found("resource", "id", "unknown"),
            other => AppError::Database {
                operation: operation.to_string(),
                source: anyhow::Error::from(other),
            },
        }
    }

    fn convert_database_error(
        kind: DatabaseErrorKind,
        info: &(dyn DatabaseErrorInformation + Send + Sync),
        operation: &str,
    ) -> AppError {
        let message = info.message();
        let details = info.details();
        let constraint_name = info.constraint_name();

        match kind {
            DatabaseErrorKind::UniqueViolation => {
                let (entity, field, value) =
                    ConstraintParser::parse_unique_violation(message, details, constraint_name)
                        .unwrap_or_else(|| {
                            ("resource".to_string(), "unknown".to_string(), "duplicate_value".to_string())
                        });
                AppError::Conflict {
                    entity,
                    field,
                    value,
                }
            }
            DatabaseErrorKind::ForeignKeyViolation => {
                let (entity, field, value) =
                    ConstraintParser::parse_foreign_key_violation(message, details, constraint_name)
                        .unwrap_or_else(|| {
                            ("resource".to_string(), "unknown".to_string(), "unknown".to_string())
                        });
                AppError::NotFound {
                    entity,
                    field,
                    value,
                }
            }
            DatabaseErrorKind::CheckViolation => {
                match constraint_name.and_then(ConstraintParser::parse_constraint_name) {
                    Some((entity, field)) => {
                        AppError::invariant(&entity, format!("check constraint failed on {}", field))
                    }
                    None => AppError::invariant("resource", "check constraint failed"),
                }
            }
            _ => AppError::Database {
                operation: operation.to_string(),
                source: anyhow::Error::msg(format!("{:?}: {}", kind, message)),
            },
        }
    }
}
