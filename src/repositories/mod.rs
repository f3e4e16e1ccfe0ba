//! Repository layer for data access operations.
//!
//! Each aggregate has an async trait that the services depend on and a
//! PostgreSQL implementation. `save` is an upsert decided by probing for the
//! identity; natural-key uniqueness is enforced by the database and surfaces
//! as `AppError::Conflict`.

mod company_repo;
mod response_repo;
mod university_repo;
mod vacancy_repo;

pub use company_repo::{CompanyRepository, PgCompanyRepository};
pub use response_repo::{PgResponseRepository, ResponseRepository};
pub use university_repo::{PgUniversityRepository, UniversityRepository};
pub use vacancy_repo::{PgVacancyRepository, VacancyRepository};

use std::sync::Arc;

use crate::db::AsyncDbPool;

/// Aggregates all repositories for convenient access.
///
/// Every member is a shared trait object, so cloning is cheap.
#[derive(Clone)]
pub struct Repositories {
    pub companies: Arc<dyn CompanyRepository>,
    pub universities: Arc<dyn UniversityRepository>,
    pub vacancies: Arc<dyn VacancyRepository>,
    pub responses: Arc<dyn ResponseRepository>,
}

impl Repositories {
    pub fn new(
        companies: Arc<dyn CompanyRepository>,
        universities: Arc<dyn UniversityRepository>,
        vacancies: Arc<dyn VacancyRepository>,
        responses: Arc<dyn ResponseRepository>,
    ) -> Self {
        Self {
            companies,
            universities,
            vacancies,
            responses,
        }
    }

    /// Creates PostgreSQL repositories sharing one connection pool.
    ///
    /// # Arguments
    /// * `pool` - The async database connection pool
    pub fn postgres(pool: AsyncDbPool) -> Self {
        Self {
            companies: Arc::new(PgCompanyRepository::new(pool.clone())),
            universities: Arc::new(PgUniversityRepository::new(pool.clone())),
            vacancies: Arc::new(PgVacancyRepository::new(pool.clone())),
            responses: Arc::new(PgResponseRepository::new(pool)),
        }
    }
}
