//! Response repository.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::db::AsyncDbPool;
use crate::domain::{Response, ResponseFilter};
use crate::error::{AppError, AppResult};
use crate::models::ResponseRecord;

#[async_trait]
pub trait ResponseRepository: Send + Sync {
    /// Inserts the response if its id is unknown, updates it otherwise.
    ///
    /// # Arguments
    /// * `response` - The validated response to persist
    ///
    /// # Errors
    /// `NotFound` when the vacancy row is gone
    async fn save(&self, response: &Response) -> AppResult<()>;

    /// Finds a response by its ID.
    ///
    /// # Arguments
    /// * `response_id` - The response's ID
    ///
    /// # Returns
    /// `Some(Response)` if found, `None` otherwise
    async fn find_by_id(&self, response_id: Uuid) -> AppResult<Option<Response>>;

    /// Lists the responses to one vacancy, newest first.
    ///
    /// # Arguments
    /// * `vacancy` - The vacancy's ID
    /// * `limit` - Maximum number of responses to return
    /// * `offset` - Number of responses to skip
    async fn list_by_vacancy(&self, vacancy: Uuid, limit: i64, offset: i64) -> AppResult<Vec<Response>>;

    /// Expects an already validated status criterion.
    ///
    /// # Arguments
    /// * `filter` - Vacancy and status criteria plus the page window
    ///
    /// # Returns
    /// Matching responses, newest first
    async fn search(&self, filter: &ResponseFilter) -> AppResult<Vec<Response>>;

    /// Deletes a response.
    ///
    /// # Returns
    /// `false` when no row had this id
    async fn delete(&self, response_id: Uuid) -> AppResult<bool>;
}

#[derive(Clone)]
pub struct PgResponseRepository {
    pool: AsyncDbPool,
}

impl PgResponseRepository {
    /// Creates a new PgResponseRepository with the given connection pool.
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResponseRepository for PgResponseRepository {
    async fn save(&self, response: &Response) -> AppResult<()> {
        use crate::schema::responses::dsl::*;
        let record = ResponseRecord::from(response);
        let mut conn = self.pool.get().await.map_err(AppError::pool)?;

        let existing = responses
            .find(record.id)
            .select(id)
            .first::<Uuid>(&mut conn)
            .await
            .optional()?;

        if existing.is_some() {
            diesel::update(responses.find(record.id))
                .set(&record)
                .execute(&mut conn)
                .await?;
        } else {
            diesel::insert_into(responses)
                .values(&record)
                .execute(&mut conn)
                .await?;
        }
        Ok(())
    }

    async fn find_by_id(&self, response_id: Uuid) -> AppResult<Option<Response>> {
        use crate::schema::responses::dsl::*;
        let mut conn = self.pool.get().await.map_err(AppError::pool)?;

        responses
            .find(response_id)
            .select(ResponseRecord::as_select())
            .first(&mut conn)
            .await
            .optional()?
            .map(Response::try_from)
            .transpose()
    }

    async fn list_by_vacancy(&self, vacancy: Uuid, limit: i64, offset: i64) -> AppResult<Vec<Response>> {
        self.search(&ResponseFilter {
            vacancy_id: Some(vacancy),
            status: None,
            limit,
            offset,
        })
        .await
    }

    async fn search(&self, filter: &ResponseFilter) -> AppResult<Vec<Response>> {
        use crate::schema::responses::dsl::*;
        let mut conn = self.pool.get().await.map_err(AppError::pool)?;

        let mut query = responses.select(ResponseRecord::as_select()).into_boxed();
        if let Some(vacancy) = filter.vacancy_id {
            query = query.filter(vacancy_id.eq(vacancy));
        }
        if let Some(value) = &filter.status {
            query = query.filter(status.eq(value.clone()));
        }

        query
            .order(created_at.desc())
            .limit(filter.limit)
            .offset(filter.offset)
            .load(&mut conn)
            .await?
            .into_iter()
            .map(Response::try_from)
            .collect()
    }

    async fn delete(&self, response_id: Uuid) -> AppResult<bool> {
        use crate::schema::responses::dsl::*;
        let mut conn = self.pool.get().await.map_err(AppError::pool)?;

        let affected = diesel::delete(responses.find(response_id))
            .execute(&mut conn)
            .await?;
        Ok(affected > 0)
    }
}
