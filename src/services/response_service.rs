//! Response service.
//!
//! A response only needs its vacancy to exist; inactive vacancies still
//! accept responses.

use std::sync::Arc;

use uuid::Uuid;

use super::{page_limit, page_offset};
use crate::domain::{Clock, CreateResponseAttrs, Response, ResponseFilter};
use crate::error::{AppError, AppResult};
use crate::repositories::{ResponseRepository, VacancyRepository};

#[derive(Clone)]
pub struct ResponseService {
    responses: Arc<dyn ResponseRepository>,
    vacancies: Arc<dyn VacancyRepository>,
    clock: Arc<dyn Clock>,
}

impl ResponseService {
    pub fn new(
        responses: Arc<dyn ResponseRepository>,
        vacancies: Arc<dyn VacancyRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            responses,
            vacancies,
            clock,
        }
    }

    async fn load(&self, id: Uuid) -> AppResult<Response> {
        self.responses
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("response", "id", id))
    }

    /// Submits a candidate response with status `new`.
    pub async fn create(&self, attrs: CreateResponseAttrs) -> AppResult<Response> {
        if self.vacancies.find_by_id(attrs.vacancy_id).await?.is_none() {
            return Err(AppError::not_found("vacancy", "id", attrs.vacancy_id));
        }

        let response = Response::create(attrs, self.clock.now())?;
        self.responses.save(&response).await?;
        tracing::info!(response_id = %response.id(), vacancy_id = %response.vacancy_id(), "Response created");
        Ok(response)
    }

    /// Moves a response to another review status.
    ///
    /// An unlisted status is rejected by the entity with `InvariantViolated`.
    pub async fn set_status(&self, id: Uuid, status: &str) -> AppResult<Response> {
        let response = self.load(id).await?.set_status(status, self.clock.now())?;
        self.responses.save(&response).await?;
        tracing::info!(response_id = %id, status = %response.status(), "Response status changed");
        Ok(response)
    }

    pub async fn update_contacts(
        &self,
        id: Uuid,
        full_name: Option<&str>,
        email: Option<&str>,
        phone: Option<&str>,
    ) -> AppResult<Response> {
        let response = self
            .load(id)
            .await?
            .update_contacts(full_name, email, phone, self.clock.now())?;
        self.responses.save(&response).await?;
        tracing::info!(response_id = %id, "Response contacts updated");
        Ok(response)
    }

    pub async fn get(&self, id: Uuid) -> AppResult<Response> {
        tracing::debug!(response_id = %id, "Fetching response");
        self.load(id).await
    }

    pub async fn list_by_vacancy(&self, vacancy_id: Uuid, limit: i64, offset: i64) -> AppResult<Vec<Response>> {
        self.responses
            .list_by_vacancy(vacancy_id, page_limit(limit), page_offset(offset))
            .await
    }

    pub async fn search(&self, filter: ResponseFilter) -> AppResult<Vec<Response>> {
        filter.parsed_status()?;
        let filter = ResponseFilter {
            limit: page_limit(filter.limit),
            offset: page_offset(filter.offset),
            ..filter
        };
        self.responses.search(&filter).await
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        if !self.responses.delete(id).await? {
            return Err(AppError::not_found("response", "id", id));
        }
        tracing::info!(response_id = %id, "Response deleted");
        Ok(())
    }
}
