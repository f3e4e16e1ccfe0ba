use diesel::prelude::*;
use jiff_diesel::{Timestamp, ToDiesel};
use uuid::Uuid;

use crate::domain::{University, UniversitySnapshot};
use crate::error::AppError;

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::universities)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UniversityRecord {
    pub id: Uuid,
    pub title: String,
    pub login: String,
    pub password_hash: String,
    pub inn: String,
    pub confirmed: bool,
    pub contacts: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<&University> for UniversityRecord {
    fn from(university: &University) -> Self {
        let s = university.snapshot();
        Self {
            id: s.id,
            title: s.title,
            login: s.login,
            password_hash: s.password_hash,
            inn: s.inn,
            confirmed: s.confirmed,
            contacts: s.contacts,
            created_at: s.created_at.to_diesel(),
            updated_at: s.updated_at.to_diesel(),
        }
    }
}

impl TryFrom<UniversityRecord> for University {
    type Error = AppError;

    fn try_from(row: UniversityRecord) -> Result<Self, Self::Error> {
        University::reconstruct(UniversitySnapshot {
            id: row.id,
            title: row.title,
            login: row.login,
            password_hash: row.password_hash,
            inn: row.inn,
            confirmed: row.confirmed,
            contacts: row.contacts,
            created_at: row.created_at.to_jiff(),
            updated_at: row.updated_at.to_jiff(),
        })
    }
}
