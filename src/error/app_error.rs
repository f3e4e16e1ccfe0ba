use crate::config::error::ConfigError;
use crate::error::DatabaseErrorConverter;
use thiserror::Error;

/// Stable classification of every error the services can return.
///
/// Callers (transport adapters, the CLI) branch on this instead of on
/// error text. Each `AppError` variant maps onto exactly one kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotFound,
    Conflict,
    Unauthorized,
    Forbidden,
    InvariantViolated,
    Internal,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::NotFound => "not_found",
            ErrorKind::Conflict => "conflict",
            ErrorKind::Unauthorized => "unauthorized",
            ErrorKind::Forbidden => "forbidden",
            ErrorKind::InvariantViolated => "invariant_violated",
            ErrorKind::Internal => "internal",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Application-wide error type that represents all possible errors in the system.
///
/// Entity constructors and transitions only ever produce `InvariantViolated`.
/// Services translate collaborator failures into the remaining variants so no
/// storage-layer error type crosses the service boundary.
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found error with entity, field, and value information
    #[error("Resource not found: {entity} with {field}={value}")]
    NotFound {
        entity: String,
        field: String,
        value: String,
    },

    /// Natural-key or identity collision
    #[error("Conflict: {entity}.{field} = '{value}' already exists")]
    Conflict {
        entity: String,
        field: String,
        value: String,
    },

    /// Bad credentials or a bad/expired token
    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    /// Authenticated, but not allowed to perform the operation
    #[error("Forbidden: {message}")]
    Forbidden { message: String },

    /// Cross-aggregate business rule rejected the operation
    #[error("Rejected: {message}")]
    BusinessRule { message: String },

    /// Entity-level validation failure with a machine-checkable reason
    #[error("Invariant violated for {entity}: {reason}")]
    InvariantViolated { entity: String, reason: String },

    /// Database operation error with operation context
    #[error("Database operation failed: {operation}")]
    Database {
        operation: String,
        #[source]
        source: anyhow::Error,
    },

    /// Connection pool error
    #[error("Connection pool error")]
    ConnectionPool {
        #[source]
        source: anyhow::Error,
    },

    /// Configuration error with key information
    #[error("Configuration error: {key}")]
    Configuration {
        key: String,
        #[source]
        source: anyhow::Error,
    },

    /// Internal error for unexpected failures
    #[error("Internal error")]
    Internal {
        #[source]
        source: anyhow::Error,
    },
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::NotFound { .. } => ErrorKind::NotFound,
            AppError::Conflict { .. } => ErrorKind::Conflict,
            AppError::Unauthorized { .. } => ErrorKind::Unauthorized,
            AppError::Forbidden { .. } | AppError::BusinessRule { .. } => ErrorKind::Forbidden,
            AppError::InvariantViolated { .. } => ErrorKind::InvariantViolated,
            AppError::Database { .. }
            | AppError::ConnectionPool { .. }
            | AppError::Configuration { .. }
            | AppError::Internal { .. } => ErrorKind::Internal,
        }
    }

    pub fn not_found(entity: &str, field: &str, value: impl ToString) -> Self {
        AppError::NotFound {
            entity: entity.to_string(),
            field: field.to_string(),
            value: value.to_string(),
        }
    }

    pub fn conflict(entity: &str, field: &str, value: impl ToString) -> Self {
        AppError::Conflict {
            entity: entity.to_string(),
            field: field.to_string(),
            value: value.to_string(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        AppError::Unauthorized {
            message: message.into(),
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        AppError::Forbidden {
            message: message.into(),
        }
    }

    pub fn business_rule(message: impl Into<String>) -> Self {
        AppError::BusinessRule {
            message: message.into(),
        }
    }

    pub fn invariant(entity: &str, reason: impl Into<String>) -> Self {
        AppError::InvariantViolated {
            entity: entity.to_string(),
            reason: reason.into(),
        }
    }

    /// Wraps a connection pool failure. Accepts any displayable error so
    /// callers don't depend on the pool's concrete error type.
    pub fn pool(error: impl std::fmt::Display) -> Self {
        AppError::ConnectionPool {
            source: anyhow::anyhow!("{}", error),
        }
    }

    /// Returns the invariant reason tag, if this is an invariant violation.
    pub fn invariant_reason(&self) -> Option<&str> {
        match self {
            AppError::InvariantViolated { reason, .. } => Some(reason),
            _ => None,
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        AppError::Internal { source: error }
    }
}

impl From<diesel::result::Error> for AppError {
    fn from(error: diesel::result::Error) -> Self {
        DatabaseErrorConverter::convert_diesel_error(error, "database operation")
    }
}

impl From<ConfigError> for AppError {
    fn from(error: ConfigError) -> Self {
        let key = match &error {
            ConfigError::ValidationError { field, .. } => field.clone(),
            _ => "settings".to_string(),
        };
        AppError::Configuration {
            key,
            source: anyhow::Error::new(error),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<(String, String)> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                let field = field.to_string();
                errs.iter().map(move |err| {
                    let reason = err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("invalid {}", field));
                    (field.clone(), reason)
                })
            })
            .collect();
        // HashMap iteration order is unstable; report the same field every time.
        fields.sort();

        match fields.into_iter().next() {
            Some((field, reason)) => AppError::InvariantViolated {
                entity: field,
                reason,
            },
            None => AppError::invariant("input", "invalid input"),
        }
    }
}

/// Type alias for Result with AppError to simplify function signatures
pub type AppResult<T> = Result<T, AppError>;
