//! Business aggregates of the job board.
//!
//! Every aggregate is a value wrapping a private snapshot. The only ways to
//! obtain one are `create` (fresh identity and timestamps) and `reconstruct`
//! (from a stored snapshot); both run the same invariant check. Transitions
//! borrow the current value and return a new, re-validated one, so a failed
//! transition leaves the caller holding the original.

pub mod actor;
pub mod clock;
pub mod company;
pub mod response;
pub mod university;
pub mod vacancy;

#[cfg(test)]
mod tests;

pub use actor::{Actor, Role};
pub use clock::{Clock, FixedClock, SystemClock};
pub use company::{Company, CompanyProfileUpdate, CompanySnapshot, CreateCompanyAttrs};
pub use response::{CreateResponseAttrs, Response, ResponseFilter, ResponseSnapshot, ResponseStatus};
pub use university::{CreateUniversityAttrs, University, UniversitySnapshot};
pub use vacancy::{CreateVacancyAttrs, Vacancy, VacancyFilter, VacancyPatch, VacancySnapshot};

use crate::error::{AppError, AppResult};
use jiff::Timestamp;

/// Overwrites `target` only when `value` carries a non-empty string.
pub(crate) fn patch_text(target: &mut String, value: Option<&str>) {
    if let Some(value) = value.filter(|v| !v.is_empty()) {
        *target = value.to_string();
    }
}

/// Length in characters, not bytes.
pub(crate) fn char_len(value: &str) -> usize {
    value.chars().count()
}

/// The zero instant. Snapshots carrying it were never stamped.
pub(crate) fn is_zero_time(at: &Timestamp) -> bool {
    *at == Timestamp::default()
}

/// Checks the timestamp rules shared by every aggregate.
pub(crate) fn check_timestamps(
    entity: &str,
    created_at: &Timestamp,
    updated_at: &Timestamp,
) -> AppResult<()> {
    if is_zero_time(created_at) {
        return Err(AppError::invariant(entity, "zero creation time"));
    }
    if is_zero_time(updated_at) {
        return Err(AppError::invariant(entity, "zero updation time"));
    }
    if created_at > updated_at {
        return Err(AppError::invariant(
            entity,
            "creation time is after updation time",
        ));
    }
    Ok(())
}
