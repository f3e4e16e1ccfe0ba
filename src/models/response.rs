use diesel::prelude::*;
use jiff_diesel::{Timestamp, ToDiesel};
use uuid::Uuid;

use crate::domain::{Response, ResponseSnapshot};
use crate::error::AppError;

/// Row of the `responses` table. `status` is kept as text and parsed on the
/// way out, so an unlisted value in storage is rejected, not coerced.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::responses)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ResponseRecord {
    pub id: Uuid,
    pub vacancy_id: Uuid,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub cover_letter: String,
    pub resume_url: String,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<&Response> for ResponseRecord {
    fn from(response: &Response) -> Self {
        let s = response.snapshot();
        Self {
            id: s.id,
            vacancy_id: s.vacancy_id,
            full_name: s.full_name,
            email: s.email,
            phone: s.phone,
            cover_letter: s.cover_letter,
            resume_url: s.resume_url,
            status: s.status.as_str().to_string(),
            created_at: s.created_at.to_diesel(),
            updated_at: s.updated_at.to_diesel(),
        }
    }
}

impl TryFrom<ResponseRecord> for Response {
    type Error = AppError;

    fn try_from(row: ResponseRecord) -> Result<Self, Self::Error> {
        Response::reconstruct(ResponseSnapshot {
            id: row.id,
            vacancy_id: row.vacancy_id,
            full_name: row.full_name,
            email: row.email,
            phone: row.phone,
            cover_letter: row.cover_letter,
            resume_url: row.resume_url,
            status: row.status.parse()?,
            created_at: row.created_at.to_jiff(),
            updated_at: row.updated_at.to_jiff(),
        })
    }
}
