//! Row models for the PostgreSQL adapter.
//!
//! Each record mirrors one table. Records convert into entities only through
//! the entity's `reconstruct`, so a stored row that breaks an invariant
//! surfaces as `InvariantViolated` instead of a half-valid value.

mod company;
mod response;
mod university;
mod vacancy;

pub use company::CompanyRecord;
pub use response::ResponseRecord;
pub use university::UniversityRecord;
pub use vacancy::VacancyRecord;
