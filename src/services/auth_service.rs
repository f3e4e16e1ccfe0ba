use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{Actor, Clock, Role};
use crate::error::AppResult;
use crate::utils::TokenService;

/// Turns bearer tokens into actors and back.
#[derive(Clone)]
pub struct AuthService {
    tokens: Arc<dyn TokenService>,
    clock: Arc<dyn Clock>,
}

impl AuthService {
    pub fn new(tokens: Arc<dyn TokenService>, clock: Arc<dyn Clock>) -> Self {
        Self { tokens, clock }
    }

    /// Resolves a bearer token. Every failure is `Unauthorized`.
    pub fn authenticate(&self, token: &str) -> AppResult<Actor> {
        let token = token.strip_prefix("Bearer ").unwrap_or(token).trim();
        self.tokens.validate(token).inspect_err(|e| {
            tracing::warn!(error = %e, "Token rejected");
        })
    }

    /// Issues a token for `subject` acting as `role`, stamped with the clock.
    pub fn issue(&self, subject: Uuid, role: Role) -> AppResult<String> {
        self.tokens.generate(subject, role, self.clock.now())
    }
}
