//! Company repository.
//!
//! `CompanyRepository` is the port the services depend on;
//! `PgCompanyRepository` implements it on the `companies` table.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::db::AsyncDbPool;
use crate::domain::Company;
use crate::error::{AppError, AppResult};
use crate::models::CompanyRecord;

#[async_trait]
pub trait CompanyRepository: Send + Sync {
    /// Inserts the company if its id is unknown, updates it otherwise.
    async fn save(&self, company: &Company) -> AppResult<()>;

    async fn find_by_id(&self, company_id: Uuid) -> AppResult<Option<Company>>;

    async fn find_by_login(&self, company_login: &str) -> AppResult<Option<Company>>;

    async fn find_by_inn(&self, company_inn: &str) -> AppResult<Option<Company>>;

    /// Newest first. `approved = None` lists every company.
    async fn list(&self, approved: Option<bool>, limit: i64, offset: i64) -> AppResult<Vec<Company>>;

    async fn list_by_representative(&self, representative: Uuid) -> AppResult<Vec<Company>>;

    /// Returns `false` when no row had this id.
    async fn delete(&self, company_id: Uuid) -> AppResult<bool>;
}

/// PostgreSQL-backed company repository.
///
/// Since `AsyncDbPool` (bb8::Pool) internally uses `Arc`, cloning is cheap.
#[derive(Clone)]
pub struct PgCompanyRepository {
    pool: AsyncDbPool,
}

impl PgCompanyRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CompanyRepository for PgCompanyRepository {
    async fn save(&self, company: &Company) -> AppResult<()> {
        use crate::schema::companies::dsl::*;
        let record = CompanyRecord::from(company);
        let mut conn = self.pool.get().await.map_err(AppError::pool)?;

        let existing = companies
            .find(record.id)
            .select(id)
            .first::<Uuid>(&mut conn)
            .await
            .optional()?;

        if existing.is_some() {
            diesel::update(companies.find(record.id))
                .set(&record)
                .execute(&mut conn)
                .await?;
        } else {
            diesel::insert_into(companies)
                .values(&record)
                .execute(&mut conn)
                .await?;
        }
        Ok(())
    }

    async fn find_by_id(&self, company_id: Uuid) -> AppResult<Option<Company>> {
        use crate::schema::companies::dsl::*;
        let mut conn = self.pool.get().await.map_err(AppError::pool)?;

        companies
            .find(company_id)
            .select(CompanyRecord::as_select())
            .first(&mut conn)
            .await
            .optional()?
            .map(Company::try_from)
            .transpose()
    }

    async fn find_by_login(&self, company_login: &str) -> AppResult<Option<Company>> {
        use crate::schema::companies::dsl::*;
        let mut conn = self.pool.get().await.map_err(AppError::pool)?;

        companies
            .filter(login.eq(company_login))
            .select(CompanyRecord::as_select())
            .first(&mut conn)
            .await
            .optional()?
            .map(Company::try_from)
            .transpose()
    }

    async fn find_by_inn(&self, company_inn: &str) -> AppResult<Option<Company>> {
        use crate::schema::companies::dsl::*;
        let mut conn = self.pool.get().await.map_err(AppError::pool)?;

        companies
            .filter(inn.eq(company_inn))
            .select(CompanyRecord::as_select())
            .first(&mut conn)
            .await
            .optional()?
            .map(Company::try_from)
            .transpose()
    }

    async fn list(&self, only_approved: Option<bool>, limit: i64, offset: i64) -> AppResult<Vec<Company>> {
        use crate::schema::companies::dsl::*;
        let mut conn = self.pool.get().await.map_err(AppError::pool)?;

        let mut query = companies.select(CompanyRecord::as_select()).into_boxed();
        if let Some(flag) = only_approved {
            query = query.filter(approved.eq(flag));
        }

        query
            .order(created_at.desc())
            .limit(limit)
            .offset(offset)
            .load(&mut conn)
            .await?
            .into_iter()
            .map(Company::try_from)
            .collect()
    }

    async fn list_by_representative(&self, representative: Uuid) -> AppResult<Vec<Company>> {
        use crate::schema::companies::dsl::*;
        let mut conn = self.pool.get().await.map_err(AppError::pool)?;

        companies
            .filter(representative_id.eq(representative))
            .order(created_at.desc())
            .select(CompanyRecord::as_select())
            .load(&mut conn)
            .await?
            .into_iter()
            .map(Company::try_from)
            .collect()
    }

    async fn delete(&self, company_id: Uuid) -> AppResult<bool> {
        use crate::schema::companies::dsl::*;
        let mut conn = self.pool.get().await.map_err(AppError::pool)?;

        let affected = diesel::delete(companies.find(company_id))
            .execute(&mut conn)
            .await?;
        Ok(affected > 0)
    }
}
