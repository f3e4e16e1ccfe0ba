use std::sync::Arc;

use crate::cli::parser::TokenCommand;
use crate::config::JwtConfig;
use crate::domain::SystemClock;
use crate::error::AppResult;
use crate::services::AuthService;
use crate::utils::JwtTokenService;

/// Issues and inspects bearer tokens without touching the database.
pub struct TokenCommandHandler {
    auth: AuthService,
}

impl TokenCommandHandler {
    pub fn new(auth: AuthService) -> Self {
        Self { auth }
    }

    /// Signs with the configured secret and lifetime against the system clock.
    pub fn from_config(config: &JwtConfig) -> Self {
        let tokens = JwtTokenService::new(config.secret.clone(), config.token_expiration);
        Self::new(AuthService::new(Arc::new(tokens), Arc::new(SystemClock)))
    }

    pub fn execute(&self, command: &TokenCommand) -> AppResult<String> {
        match command {
            TokenCommand::Issue { subject, role } => {
                let token = self.auth.issue(*subject, *role)?;
                tracing::info!(subject = %subject, role = %role, "Token issued");
                Ok(token)
            }
            TokenCommand::Inspect { token } => {
                let actor = self.auth.authenticate(token)?;
                Ok(format!("subject: {}\nrole:    {}", actor.id, actor.role))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;
    use crate::domain::Role;
    use crate::error::ErrorKind;

    fn handler() -> TokenCommandHandler {
        TokenCommandHandler::from_config(&JwtConfig {
            secret: "a-test-secret-that-is-long-enough-for-hs256".to_string(),
            token_expiration: 1,
        })
    }

    #[test]
    fn issued_token_can_be_inspected() {
        let handler = handler();
        let subject = Uuid::new_v4();

        let token = handler
            .execute(&TokenCommand::Issue {
                subject,
                role: Role::University,
            })
            .unwrap();
        let printed = handler
            .execute(&TokenCommand::Inspect {
                token: format!("Bearer {token}"),
            })
            .unwrap();

        assert_eq!(printed, format!("subject: {subject}\nrole:    university"));
    }

    #[test]
    fn foreign_token_is_unauthorized() {
        let other = TokenCommandHandler::from_config(&JwtConfig {
            secret: "another-secret-that-is-also-long-enough-ok".to_string(),
            token_expiration: 1,
        });
        let token = other
            .execute(&TokenCommand::Issue {
                subject: Uuid::new_v4(),
                role: Role::Admin,
            })
            .unwrap();

        let err = handler()
            .execute(&TokenCommand::Inspect { token })
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unauthorized);
    }
}
