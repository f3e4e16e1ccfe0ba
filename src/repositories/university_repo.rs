//! University repository.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::db::AsyncDbPool;
use crate::domain::University;
use crate::error::{AppError, AppResult};
use crate::models::UniversityRecord;

#[async_trait]
pub trait UniversityRepository: Send + Sync {
    /// Inserts the university if its id is unknown, updates it otherwise.
    ///
    /// # Arguments
    /// * `university` - The validated university to persist
    ///
    /// # Errors
    /// `Conflict` when another university already holds the login
    async fn save(&self, university: &University) -> AppResult<()>;

    /// Finds a university by its ID.
    ///
    /// # Arguments
    /// * `university_id` - The university's ID
    ///
    /// # Returns
    /// `Some(University)` if found, `None` otherwise
    async fn find_by_id(&self, university_id: Uuid) -> AppResult<Option<University>>;

    /// Finds a university by its login.
    ///
    /// # Arguments
    /// * `university_login` - The login to look up
    ///
    /// # Returns
    /// `Some(University)` if found, `None` otherwise
    async fn find_by_login(&self, university_login: &str) -> AppResult<Option<University>>;

    /// Lists universities, newest first.
    ///
    /// # Arguments
    /// * `limit` - Maximum number of universities to return
    /// * `offset` - Number of universities to skip
    async fn list(&self, limit: i64, offset: i64) -> AppResult<Vec<University>>;
}

#[derive(Clone)]
pub struct PgUniversityRepository {
    pool: AsyncDbPool,
}

impl PgUniversityRepository {
    /// Creates a new PgUniversityRepository with the given connection pool.
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UniversityRepository for PgUniversityRepository {
    async fn save(&self, university: &University) -> AppResult<()> {
        use crate::schema::universities::dsl::*;
        let record = UniversityRecord::from(university);
        let mut conn = self.pool.get().await.map_err(AppError::pool)?;

        let existing = universities
            .find(record.id)
            .select(id)
            .first::<Uuid>(&mut conn)
            .await
            .optional()?;

        if existing.is_some() {
            diesel::update(universities.find(record.id))
                .set(&record)
                .execute(&mut conn)
                .await?;
        } else {
            diesel::insert_into(universities)
                .values(&record)
                .execute(&mut conn)
                .await?;
        }
        Ok(())
    }

    async fn find_by_id(&self, university_id: Uuid) -> AppResult<Option<University>> {
        use crate::schema::universities::dsl::*;
        let mut conn = self.pool.get().await.map_err(AppError::pool)?;

        universities
            .find(university_id)
            .select(UniversityRecord::as_select())
            .first(&mut conn)
            .await
            .optional()?
            .map(University::try_from)
            .transpose()
    }

    async fn find_by_login(&self, university_login: &str) -> AppResult<Option<University>> {
        use crate::schema::universities::dsl::*;
        let mut conn = self.pool.get().await.map_err(AppError::pool)?;

        universities
            .filter(login.eq(university_login))
            .select(UniversityRecord::as_select())
            .first(&mut conn)
            .await
            .optional()?
            .map(University::try_from)
            .transpose()
    }

    async fn list(&self, limit: i64, offset: i64) -> AppResult<Vec<University>> {
        use crate::schema::universities::dsl::*;
        let mut conn = self.pool.get().await.map_err(AppError::pool)?;

        universities
            .order(created_at.desc())
            .limit(limit)
            .offset(offset)
            .select(UniversityRecord::as_select())
            .load(&mut conn)
            .await?
            .into_iter()
            .map(University::try_from)
            .collect()
    }
}
