use diesel::prelude::*;
use jiff_diesel::{Timestamp, ToDiesel};
use uuid::Uuid;

use crate::domain::{Vacancy, VacancySnapshot};
use crate::error::AppError;

/// Row of the `vacancies` table.
///
/// `treat_none_as_null` makes an update write NULL salary bounds instead of
/// skipping the columns.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::vacancies)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub struct VacancyRecord {
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

impl From<&Vacancy> for VacancyRecord {
    fn from(vacancy: &Vacancy) -> Self {
        let s = vacancy.snapshot();
        Self {
            id: s.id,
            company_id: s.company_id,
            title: s.title,
            description: s.description,
            contacts: s.contacts,
            requirements: s.requirements,
            responsibilities: s.responsibilities,
            conditions: s.conditions,
            salary_from: s.salary_from,
            salary_to: s.salary_to,
            employment: s.employment,
            schedule: s.schedule,
            experience: s.experience,
            education: s.education,
            location: s.location,
            is_active: s.is_active,
            created_at: s.created_at.to_diesel(),
            updated_at: s.updated_at.to_diesel(),
        }
    }
}

impl TryFrom<VacancyRecord> for Vacancy {
    type Error = AppError;

    fn try_from(row: VacancyRecord) -> Result<Self, Self::Error> {
        Vacancy::reconstruct(VacancySnapshot {
            id: row.id,
            company_id: row.company_id,
            title: row.title,
            description: row.description,
            contacts: row.contacts,
            requirements: row.requirements,
            responsibilities: row.responsibilities,
            conditions: row.conditions,
            salary_from: row.salary_from,
            salary_to: row.salary_to,
            employment: row.employment,
            schedule: row.schedule,
            experience: row.experience,
            education: row.education,
            location: row.location,
            is_active: row.is_active,
            created_at: row.created_at.to_jiff(),
            updated_at: row.updated_at.to_jiff(),
        })
    }
}
