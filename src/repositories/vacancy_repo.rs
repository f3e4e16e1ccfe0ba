//! Vacancy repository.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::db::AsyncDbPool;
use crate::domain::{Vacancy, VacancyFilter};
use crate::error::{AppError, AppResult};
use crate::models::VacancyRecord;

/// Storage port for vacancies.
#[async_trait]
pub trait VacancyRepository: Send + Sync {
    /// Inserts the vacancy if its id is unknown, updates it otherwise.
    ///
    /// # Arguments
    /// * `vacancy` - The validated vacancy to persist
    ///
    /// # Errors
    /// `NotFound` when the owning company row is gone
    async fn save(&self, vacancy: &Vacancy) -> AppResult<()>;

    /// Finds a vacancy by its ID.
    ///
    /// # Arguments
    /// * `vacancy_id` - The vacancy's ID
    ///
    /// # Returns
    /// `Some(Vacancy)` if found, `None` otherwise
    async fn find_by_id(&self, vacancy_id: Uuid) -> AppResult<Option<Vacancy>>;

    /// Lists the vacancies of one company, newest first.
    ///
    /// # Arguments
    /// * `company` - The owning company's ID
    /// * `limit` - Maximum number of vacancies to return
    /// * `offset` - Number of vacancies to skip
    async fn list_by_company(&self, company: Uuid, limit: i64, offset: i64) -> AppResult<Vec<Vacancy>>;

    /// Lists every vacancy, newest first, active or not.
    ///
    /// # Arguments
    /// * `limit` - Maximum number of vacancies to return
    /// * `offset` - Number of vacancies to skip
    async fn list_all(&self, limit: i64, offset: i64) -> AppResult<Vec<Vacancy>>;

    /// Every set filter field is an equality match.
    ///
    /// # Arguments
    /// * `filter` - Criteria plus the page window
    ///
    /// # Returns
    /// Matching vacancies, newest first
    async fn search(&self, filter: &VacancyFilter) -> AppResult<Vec<Vacancy>>;

    /// Deletes a vacancy together with its responses.
    ///
    /// # Returns
    /// `false` when no row had this id
    async fn delete(&self, vacancy_id: Uuid) -> AppResult<bool>;
}

/// PostgreSQL implementation of [`VacancyRepository`].
///
/// Cloning only bumps the pool's reference count.
#[derive(Clone)]
pub struct PgVacancyRepository {
    pool: AsyncDbPool,
}

impl PgVacancyRepository {
    /// Creates a new PgVacancyRepository with the given connection pool.
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VacancyRepository for PgVacancyRepository {
    async fn save(&self, vacancy: &Vacancy) -> AppResult<()> {
        use crate::schema::vacancies::dsl::*;
        let record = VacancyRecord::from(vacancy);
        let mut conn = self.pool.get().await.map_err(AppError::pool)?;

        let existing = vacancies
            .find(record.id)
            .select(id)
            .first::<Uuid>(&mut conn)
            .await
            .optional()?;

        if existing.is_some() {
            diesel::update(vacancies.find(record.id))
                .set(&record)
                .execute(&mut conn)
                .await?;
        } else {
            diesel::insert_into(vacancies)
                .values(&record)
                .execute(&mut conn)
                .await?;
        }
        Ok(())
    }

    async fn find_by_id(&self, vacancy_id: Uuid) -> AppResult<Option<Vacancy>> {
        use crate::schema::vacancies::dsl::*;
        let mut conn = self.pool.get().await.map_err(AppError::pool)?;

        vacancies
            .find(vacancy_id)
            .select(VacancyRecord::as_select())
            .first(&mut conn)
            .await
            .optional()?
            .map(Vacancy::try_from)
            .transpose()
    }

    async fn list_by_company(&self, company: Uuid, limit: i64, offset: i64) -> AppResult<Vec<Vacancy>> {
        self.search(&VacancyFilter {
            company_id: Some(company),
            limit,
            offset,
            ..Default::default()
        })
        .await
    }

    async fn list_all(&self, limit: i64, offset: i64) -> AppResult<Vec<Vacancy>> {
        self.search(&VacancyFilter {
            limit,
            offset,
            ..Default::default()
        })
        .await
    }

    async fn search(&self, filter: &VacancyFilter) -> AppResult<Vec<Vacancy>> {
        use crate::schema::vacancies::dsl::*;
        let mut conn = self.pool.get().await.map_err(AppError::pool)?;

        let mut query = vacancies.select(VacancyRecord::as_select()).into_boxed();
        if let Some(company) = filter.company_id {
            query = query.filter(company_id.eq(company));
        }
        if let Some(value) = &filter.location {
            query = query.filter(location.eq(value.clone()));
        }
        if let Some(value) = &filter.employment {
            query = query.filter(employment.eq(value.clone()));
        }
        if let Some(value) = &filter.schedule {
            query = query.filter(schedule.eq(value.clone()));
        }
        if let Some(value) = &filter.experience {
            query = query.filter(experience.eq(value.clone()));
        }
        if let Some(value) = &filter.education {
            query = query.filter(education.eq(value.clone()));
        }
        if let Some(active) = filter.is_active {
            query = query.filter(is_active.eq(active));
        }

        query
            .order(created_at.desc())
            .limit(filter.limit)
            .offset(filter.offset)
            .load(&mut conn)
            .await?
            .into_iter()
            .map(Vacancy::try_from)
            .collect()
    }

    async fn delete(&self, vacancy_id: Uuid) -> AppResult<bool> {
        use crate::schema::vacancies::dsl::*;
        let mut conn = self.pool.get().await.map_err(AppError::pool)?;

        let affected = diesel::delete(vacancies.find(vacancy_id))
            .execute(&mut conn)
            .await?;
        Ok(affected > 0)
    }
}
