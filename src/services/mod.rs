//! Service layer for business logic operations.
//!
//! Services turn typed inputs into entity transitions, persist the results
//! through the repository ports and enforce the rules that span aggregates:
//! role checks, approval gates and natural-key uniqueness. Role checks run
//! before any repository call, so a rejected request has no side effects.

mod auth_service;
mod company_service;
mod response_service;
mod university_service;
mod vacancy_service;

#[cfg(test)]
pub(crate) mod tests;

pub use auth_service::AuthService;
pub use company_service::{CompanyService, RegisterCompanyInput};
pub use response_service::ResponseService;
pub use university_service::{SignUpUniversityInput, UniversityService};
pub use vacancy_service::{UpdateVacancyInput, VacancyService};

use std::sync::Arc;

use validator::Validate;

use crate::domain::Clock;
use crate::error::AppResult;
use crate::repositories::Repositories;
use crate::utils::{PasswordService, TokenService};

/// Page size used when a caller passes a non-positive limit.
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// An account together with a freshly issued bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Authenticated<T> {
    pub entity: T,
    pub token: String,
}

pub(crate) fn page_limit(limit: i64) -> i64 {
    if limit <= 0 { DEFAULT_PAGE_SIZE } else { limit }
}

pub(crate) fn page_offset(offset: i64) -> i64 {
    offset.max(0)
}

#[derive(Validate)]
struct PasswordPolicy {
    #[validate(length(min = 8, max = 64, message = "invalid password length"))]
    password: String,
}

/// Plain passwords must be 8 to 64 characters long.
pub(crate) fn check_password_policy(password: &str) -> AppResult<()> {
    PasswordPolicy {
        password: password.to_string(),
    }
    .validate()?;
    Ok(())
}

/// Aggregates all services for convenient access.
///
/// Cloning is cheap since every collaborator is behind an `Arc`.
#[derive(Clone)]
pub struct Services {
    pub companies: CompanyService,
    pub universities: UniversityService,
    pub vacancies: VacancyService,
    pub responses: ResponseService,
    pub auth: AuthService,
}

impl Services {
    /// Creates a new Services instance from Repositories and collaborators.
    pub fn new(
        repos: Repositories,
        passwords: Arc<dyn PasswordService>,
        tokens: Arc<dyn TokenService>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            companies: CompanyService::new(
                repos.companies.clone(),
                passwords.clone(),
                tokens.clone(),
                clock.clone(),
            ),
            universities: UniversityService::new(
                repos.universities,
                passwords,
                tokens.clone(),
                clock.clone(),
            ),
            vacancies: VacancyService::new(repos.vacancies.clone(), repos.companies, clock.clone()),
            responses: ResponseService::new(repos.responses, repos.vacancies, clock.clone()),
            auth: AuthService::new(tokens, clock),
        }
    }
}
