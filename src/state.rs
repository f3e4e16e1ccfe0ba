//! Composition root.
//!
//! Wires PostgreSQL repositories, Argon2 hashing, JWT tokens and the system
//! clock into the service layer.

use std::sync::Arc;

use crate::config::Settings;
use crate::db::{AsyncDbPool, establish_async_connection_pool};
use crate::domain::SystemClock;
use crate::error::AppResult;
use crate::repositories::Repositories;
use crate::services::Services;
use crate::utils::{Argon2PasswordService, JwtTokenService};

/// Cloning is cheap since both Services and AsyncDbPool use Arc internally.
#[derive(Clone)]
pub struct AppState {
    pub services: Services,
    pub db_pool: AsyncDbPool,
}

impl AppState {
    /// Builds every service on top of an existing pool.
    ///
    /// # Example
    /// ```ignore
    /// let pool = establish_async_connection_pool(&settings.database).await?;
    /// let state = AppState::new(pool, &settings);
    /// ```
    pub fn new(pool: AsyncDbPool, settings: &Settings) -> Self {
        let tokens = JwtTokenService::new(settings.jwt.secret.clone(), settings.jwt.token_expiration);
        let services = Services::new(
            Repositories::postgres(pool.clone()),
            Arc::new(Argon2PasswordService),
            Arc::new(tokens),
            Arc::new(SystemClock),
        );
        Self {
            services,
            db_pool: pool,
        }
    }

    /// Opens the connection pool described by `settings.database`.
    pub async fn connect(settings: &Settings) -> AppResult<Self> {
        let pool = establish_async_connection_pool(&settings.database).await?;
        Ok(Self::new(pool, settings))
    }
}
