//! Schema migrations over a blocking diesel connection.

use diesel::Connection;
use diesel::pg::PgConnection;
use diesel_migrations::MigrationHarness;

use crate::config::DatabaseConfig;
use crate::db::MIGRATIONS;
use crate::error::{AppError, AppResult};

pub struct MigrateCommandHandler {
    config: DatabaseConfig,
}

impl MigrateCommandHandler {
    pub fn new(config: DatabaseConfig) -> Self {
        Self { config }
    }

    /// Applies, previews or reverts migrations.
    ///
    /// # Errors
    /// - `Database` when connecting or migrating fails
    /// - `BusinessRule` when asked to revert more migrations than are applied
    pub async fn execute(&self, dry_run: bool, rollback: Option<u32>) -> AppResult<()> {
        match (dry_run, rollback) {
            (true, _) => self.show_pending_migrations().await,
            (false, Some(steps)) => self.rollback_migrations(steps).await,
            (false, None) => self.run_migrations().await.map(|_| ()),
        }
    }

    async fn show_pending_migrations(&self) -> AppResult<()> {
        let pending = self
            .with_connection("check pending migrations", |conn| {
                let pending = conn.pending_migrations(MIGRATIONS).map_err(migration_error)?;
                Ok(pending.iter().map(|m| m.name().to_string()).collect::<Vec<_>>())
            })
            .await?;

        if pending.is_empty() {
            println!("✓ No pending migrations, database is up to date");
        } else {
            println!("Found {} pending migration(s):", pending.len());
            for name in &pending {
                println!("  - {name}");
            }
            println!("\nRun without --dry-run to apply them");
        }
        Ok(())
    }

    /// Applies every pending migration and returns their versions.
    pub async fn run_migrations(&self) -> AppResult<Vec<String>> {
        let applied = self
            .with_connection("run pending migrations", |conn| {
                let applied = conn.run_pending_migrations(MIGRATIONS).map_err(migration_error)?;
                Ok(applied.iter().map(|v| v.to_string()).collect::<Vec<_>>())
            })
            .await?;

        tracing::info!(count = applied.len(), "Migrations applied");
        if applied.is_empty() {
            println!("✓ No migrations to apply, database is already up to date");
        } else {
            println!("✓ Applied {} migration(s):", applied.len());
            for version in &applied {
                println!("  - {version}");
            }
        }
        Ok(applied)
    }

    async fn rollback_migrations(&self, steps: u32) -> AppResult<()> {
        let reverted = self
            .with_connection("revert migrations", move |conn| {
                let applied = conn.applied_migrations().map_err(migration_error)?;
                if applied.len() < steps as usize {
                    return Err(AppError::business_rule(format!(
                        "cannot roll back {steps} migration(s), only {} applied",
                        applied.len()
                    )));
                }

                (0..steps)
                    .map(|_| {
                        conn.revert_last_migration(MIGRATIONS)
                            .map(|v| v.to_string())
                            .map_err(migration_error)
                    })
                    .collect::<AppResult<Vec<_>>>()
            })
            .await?;

        tracing::warn!(count = reverted.len(), "Migrations reverted");
        println!("✓ Rolled back {} migration(s):", reverted.len());
        for version in &reverted {
            println!("  - {version}");
        }
        Ok(())
    }

    /// Runs `work` on a fresh blocking connection off the async runtime.
    async fn with_connection<T, F>(&self, operation: &'static str, work: F) -> AppResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut PgConnection) -> AppResult<T> + Send + 'static,
    {
        let url = self.config.url.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = PgConnection::establish(&url).map_err(|e| AppError::Database {
                operation: operation.to_string(),
                source: anyhow::anyhow!("Connection error: {e}"),
            })?;
            work(&mut conn)
        })
        .await
        .map_err(|e| AppError::Internal {
            source: anyhow::Error::from(e),
        })?
    }
}

fn migration_error(error: Box<dyn std::error::Error + Send + Sync>) -> AppError {
    AppError::Database {
        operation: "migration".to_string(),
        source: anyhow::anyhow!("Migration error: {error}"),
    }
}
