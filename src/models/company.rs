use diesel::prelude::*;
use jiff_diesel::{Timestamp, ToDiesel};
use uuid::Uuid;

use crate::domain::{Company, CompanySnapshot};
use crate::error::AppError;

/// Row of the `companies` table, used for SELECT, INSERT and UPDATE alike.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::companies)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CompanyRecord {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub contacts: String,
    pub inn: String,
    pub address: String,
    pub website: String,
    pub logo_url: String,
    pub approved: bool,
    pub representative_id: Uuid,
    pub login: String,
    pub password_hash: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<&Company> for CompanyRecord {
    fn from(company: &Company) -> Self {
        let s = company.snapshot();
        Self {
            id: s.id,
            title: s.title,
            description: s.description,
            contacts: s.contacts,
            inn: s.inn,
            address: s.address,
            website: s.website,
            logo_url: s.logo_url,
            approved: s.approved,
            representative_id: s.representative_id,
            login: s.login,
            password_hash: s.password_hash,
            created_at: s.created_at.to_diesel(),
            updated_at: s.updated_at.to_diesel(),
        }
    }
}

impl TryFrom<CompanyRecord> for Company {
    type Error = AppError;

    fn try_from(row: CompanyRecord) -> Result<Self, Self::Error> {
        Company::reconstruct(CompanySnapshot {
            id: row.id,
            title: row.title,
            description: row.description,
            contacts: row.contacts,
            inn: row.inn,
            address: row.address,
            website: row.website,
            logo_url: row.logo_url,
            approved: row.approved,
            representative_id: row.representative_id,
            login: row.login,
            password_hash: row.password_hash,
            created_at: row.created_at.to_jiff(),
            updated_at: row.updated_at.to_jiff(),
        })
    }
}
