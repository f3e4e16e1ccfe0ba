use super::{char_len, check_timestamps, patch_text};
use crate::error::{AppError, AppResult};
use jiff::Timestamp;
use serde::Serialize;
use uuid::Uuid;

const ENTITY: &str = "vacancy";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VacancySnapshot {
    pub id: Uuid,
    pub company_id: Uuid,
    pub title: String,
    pub description: String,
    pub contacts: String,
    pub requirements: String,
    pub responsibilities: String,
    pub conditions: String,
    pub salary_from: Option<i32>,
    pub salary_to: Option<i32>,
    pub employment: String,
    pub schedule: String,
    pub experience: String,
    pub education: String,
    pub location: String,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Default)]
pub struct CreateVacancyAttrs {
    pub company_id: Uuid,
    pub title: String,
    pub description: String,
    pub contacts: String,
    pub requirements: String,
    pub responsibilities: String,
    pub conditions: String,
    pub salary_from: Option<i32>,
    pub salary_to: Option<i32>,
    pub employment: String,
    pub schedule: String,
    pub experience: String,
    pub education: String,
    pub location: String,
}

/// Partial update. Empty strings and `None` leave fields untouched; a salary
/// bound can be set but not cleared.
#[derive(Debug, Clone, Default)]
pub struct VacancyPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub contacts: Option<String>,
    pub requirements: Option<String>,
    pub responsibilities: Option<String>,
    pub conditions: Option<String>,
    pub salary_from: Option<i32>,
    pub salary_to: Option<i32>,
    pub employment: Option<String>,
    pub schedule: Option<String>,
    pub experience: Option<String>,
    pub education: Option<String>,
    pub location: Option<String>,
}

impl VacancyPatch {
    pub fn is_empty(&self) -> bool {
        let texts = [
            &self.title,
            &self.description,
            &self.contacts,
            &self.requirements,
            &self.responsibilities,
            &self.conditions,
            &self.employment,
            &self.schedule,
            &self.experience,
            &self.education,
            &self.location,
        ];
        texts.iter().all(|t| t.as_deref().is_none_or(str::is_empty))
            && self.salary_from.is_none()
            && self.salary_to.is_none()
    }
}

/// Equality filters for vacancy search. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VacancyFilter {
    pub company_id: Option<Uuid>,
    pub location: Option<String>,
    pub employment: Option<String>,
    pub schedule: Option<String>,
    pub experience: Option<String>,
    pub education: Option<String>,
    pub is_active: Option<bool>,
    pub limit: i64,
    pub offset: i64,
}

impl VacancyFilter {
    pub fn matches(&self, vacancy: &VacancySnapshot) -> bool {
        fn eq(filter: &Option<String>, value: &str) -> bool {
            filter.as_deref().is_none_or(|f| f == value)
        }

        self.company_id.is_none_or(|id| id == vacancy.company_id)
            && eq(&self.location, &vacancy.location)
            && eq(&self.employment, &vacancy.employment)
            && eq(&self.schedule, &vacancy.schedule)
            && eq(&self.experience, &vacancy.experience)
            && eq(&self.education, &vacancy.education)
            && self.is_active.is_none_or(|active| active == vacancy.is_active)
    }
}

/// Job posting owned by a company. Active on creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vacancy(VacancySnapshot);

impl Vacancy {
    pub fn create(attrs: CreateVacancyAttrs, now: Timestamp) -> AppResult<Self> {
        Self::reconstruct(VacancySnapshot {
            id: Uuid::new_v4(),
            company_id: attrs.company_id,
            title: attrs.title,
            description: attrs.description,
            contacts: attrs.contacts,
            requirements: attrs.requirements,
            responsibilities: attrs.responsibilities,
            conditions: attrs.conditions,
            salary_from: attrs.salary_from,
            salary_to: attrs.salary_to,
            employment: attrs.employment,
            schedule: attrs.schedule,
            experience: attrs.experience,
            education: attrs.education,
            location: attrs.location,
            is_active: true,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn reconstruct(snapshot: VacancySnapshot) -> AppResult<Self> {
        let vacancy = Self(snapshot);
        vacancy.check_invariants()?;
        Ok(vacancy)
    }

    fn check_invariants(&self) -> AppResult<()> {
        let s = &self.0;
        if s.id.is_nil() {
            return Err(AppError::invariant(ENTITY, "nil id"));
        }
        if s.company_id.is_nil() {
            return Err(AppError::invariant(ENTITY, "nil company id"));
        }
        if !(1..=512).contains(&char_len(&s.title)) {
            return Err(AppError::invariant(ENTITY, "invalid title length"));
        }
        if s.description.is_empty() {
            return Err(AppError::invariant(ENTITY, "empty description"));
        }
        if s.salary_from.is_some_and(|v| v < 0) {
            return Err(AppError::invariant(ENTITY, "negative salary_from"));
        }
        if s.salary_to.is_some_and(|v| v < 0) {
            return Err(AppError::invariant(ENTITY, "negative salary_to"));
        }
        if let (Some(from), Some(to)) = (s.salary_from, s.salary_to) {
            if from > to {
                return Err(AppError::invariant(ENTITY, "salary_from > salary_to"));
            }
        }
        check_timestamps(ENTITY, &s.created_at, &s.updated_at)
    }

    pub fn snapshot(&self) -> VacancySnapshot {
        self.0.clone()
    }

    pub fn id(&self) -> Uuid {
        self.0.id
    }

    pub fn company_id(&self) -> Uuid {
        self.0.company_id
    }

    pub fn title(&self) -> &str {
        &self.0.title
    }

    pub fn is_active(&self) -> bool {
        self.0.is_active
    }

    pub fn created_at(&self) -> Timestamp {
        self.0.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.0.updated_at
    }

    pub fn update(&self, patch: &VacancyPatch, now: Timestamp) -> AppResult<Self> {
        let mut next = self.snapshot();
        patch_text(&mut next.title, patch.title.as_deref());
        patch_text(&mut next.description, patch.description.as_deref());
        patch_text(&mut next.contacts, patch.contacts.as_deref());
        patch_text(&mut next.requirements, patch.requirements.as_deref());
        patch_text(&mut next.responsibilities, patch.responsibilities.as_deref());
        patch_text(&mut next.conditions, patch.conditions.as_deref());
        if patch.salary_from.is_some() {
            next.salary_from = patch.salary_from;
        }
        if patch.salary_to.is_some() {
            next.salary_to = patch.salary_to;
        }
        patch_text(&mut next.employment, patch.employment.as_deref());
        patch_text(&mut next.schedule, patch.schedule.as_deref());
        patch_text(&mut next.experience, patch.experience.as_deref());
        patch_text(&mut next.education, patch.education.as_deref());
        patch_text(&mut next.location, patch.location.as_deref());
        next.updated_at = now;
        Self::reconstruct(next)
    }

    pub fn activate(&self, now: Timestamp) -> AppResult<Self> {
        self.with_active(true, now)
    }

    pub fn deactivate(&self, now: Timestamp) -> AppResult<Self> {
        self.with_active(false, now)
    }

    fn with_active(&self, active: bool, now: Timestamp) -> AppResult<Self> {
        let mut next = self.snapshot();
        next.is_active = active;
        next.updated_at = now;
        Self::reconstruct(next)
    }
}
