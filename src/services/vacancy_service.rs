//! Vacancy service.
//!
//! Only approved companies may post. Everything else is a thin layer over
//! the entity transitions and the repository.

use std::sync::Arc;

use uuid::Uuid;

use super::{page_limit, page_offset};
use crate::domain::{Clock, CreateVacancyAttrs, Vacancy, VacancyFilter, VacancyPatch};
use crate::error::{AppError, AppResult};
use crate::repositories::{CompanyRepository, VacancyRepository};

/// Field patch plus a three-state activity flag: `None` leaves the flag
/// alone, `Some(true)` activates and `Some(false)` deactivates.
#[derive(Debug, Clone, Default)]
pub struct UpdateVacancyInput {
    pub patch: VacancyPatch,
    pub is_active: Option<bool>,
}

#[derive(Clone)]
pub struct VacancyService {
    vacancies: Arc<dyn VacancyRepository>,
    companies: Arc<dyn CompanyRepository>,
    clock: Arc<dyn Clock>,
}

impl VacancyService {
    pub fn new(
        vacancies: Arc<dyn VacancyRepository>,
        companies: Arc<dyn CompanyRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            vacancies,
            companies,
            clock,
        }
    }

    async fn load(&self, id: Uuid) -> AppResult<Vacancy> {
        self.vacancies
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("vacancy", "id", id))
    }

    /// Publishes a vacancy for an existing, approved company.
    ///
    /// # Arguments
    /// * `attrs` - Vacancy fields including the owning company id
    ///
    /// # Returns
    /// The persisted, active vacancy
    pub async fn create(&self, attrs: CreateVacancyAttrs) -> AppResult<Vacancy> {
        let company = self.companies.find_by_id(attrs.company_id).await?;
        match company {
            None => return Err(AppError::business_rule("company not found")),
            Some(company) if !company.is_approved() => {
                tracing::warn!(company_id = %company.id(), "Vacancy rejected for unapproved company");
                return Err(AppError::business_rule("company not approved"));
            }
            Some(_) => {}
        }

        let vacancy = Vacancy::create(attrs, self.clock.now())?;
        self.vacancies.save(&vacancy).await?;
        tracing::info!(vacancy_id = %vacancy.id(), company_id = %vacancy.company_id(), "Vacancy created");
        Ok(vacancy)
    }

    /// Applies a partial update and, if requested, flips the activity flag.
    pub async fn update(&self, id: Uuid, input: UpdateVacancyInput) -> AppResult<Vacancy> {
        let now = self.clock.now();
        let mut vacancy = self.load(id).await?.update(&input.patch, now)?;
        vacancy = match input.is_active {
            Some(true) => vacancy.activate(now)?,
            Some(false) => vacancy.deactivate(now)?,
            None => vacancy,
        };

        self.vacancies.save(&vacancy).await?;
        tracing::info!(vacancy_id = %id, "Vacancy updated");
        Ok(vacancy)
    }

    pub async fn activate(&self, id: Uuid) -> AppResult<Vacancy> {
        let vacancy = self.load(id).await?.activate(self.clock.now())?;
        self.vacancies.save(&vacancy).await?;
        tracing::info!(vacancy_id = %id, "Vacancy activated");
        Ok(vacancy)
    }

    pub async fn deactivate(&self, id: Uuid) -> AppResult<Vacancy> {
        let vacancy = self.load(id).await?.deactivate(self.clock.now())?;
        self.vacancies.save(&vacancy).await?;
        tracing::info!(vacancy_id = %id, "Vacancy deactivated");
        Ok(vacancy)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        if !self.vacancies.delete(id).await? {
            return Err(AppError::not_found("vacancy", "id", id));
        }
        tracing::info!(vacancy_id = %id, "Vacancy deleted");
        Ok(())
    }

    pub async fn get(&self, id: Uuid) -> AppResult<Vacancy> {
        tracing::debug!(vacancy_id = %id, "Fetching vacancy");
        self.load(id).await
    }

    pub async fn search(&self, filter: VacancyFilter) -> AppResult<Vec<Vacancy>> {
        let filter = VacancyFilter {
            limit: page_limit(filter.limit),
            offset: page_offset(filter.offset),
            ..filter
        };
        self.vacancies.search(&filter).await
    }

    pub async fn list_by_company(&self, company_id: Uuid, limit: i64, offset: i64) -> AppResult<Vec<Vacancy>> {
        self.vacancies
            .list_by_company(company_id, page_limit(limit), page_offset(offset))
            .await
    }

    pub async fn list_all(&self, limit: i64, offset: i64) -> AppResult<Vec<Vacancy>> {
        self.vacancies
            .list_all(page_limit(limit), page_offset(offset))
            .await
    }
}
