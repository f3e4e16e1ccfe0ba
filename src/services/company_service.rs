//! Company service.
//!
//! Registration, approval by an admin, login with an approval gate, and
//! owner-only profile and credential changes.

use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use super::{Authenticated, check_password_policy, page_limit, page_offset};
use crate::domain::{Actor, Clock, Company, CompanyProfileUpdate, CreateCompanyAttrs, Role};
use crate::error::{AppError, AppResult};
use crate::repositories::CompanyRepository;
use crate::utils::{PasswordService, TokenService};

/// Registration data with the plain password.
#[derive(Debug, Clone, Default, Validate)]
pub struct RegisterCompanyInput {
    pub title: String,
    pub description: String,
    pub contacts: String,
    pub inn: String,
    pub address: String,
    pub website: String,
    pub logo_url: String,
    pub representative_id: Uuid,
    pub login: String,
    #[validate(length(min = 8, max = 64, message = "invalid password length"))]
    pub password: String,
}

#[derive(Clone)]
pub struct CompanyService {
    repo: Arc<dyn CompanyRepository>,
    passwords: Arc<dyn PasswordService>,
    tokens: Arc<dyn TokenService>,
    clock: Arc<dyn Clock>,
}

impl CompanyService {
    pub fn new(
        repo: Arc<dyn CompanyRepository>,
        passwords: Arc<dyn PasswordService>,
        tokens: Arc<dyn TokenService>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repo,
            passwords,
            tokens,
            clock,
        }
    }

    async fn load(&self, id: Uuid) -> AppResult<Company> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("company", "id", id))
    }

    /// Registers a new, unapproved company.
    ///
    /// The INN and login pre-checks only give an early, friendly error; the
    /// storage unique constraints still turn a concurrent duplicate into
    /// `Conflict` on save.
    ///
    /// # Arguments
    /// * `input` - Registration data including the plain password
    ///
    /// # Returns
    /// The persisted company
    pub async fn register(&self, input: RegisterCompanyInput) -> AppResult<Company> {
        input.validate()?;

        if self.repo.find_by_inn(&input.inn).await?.is_some() {
            return Err(AppError::conflict("company", "inn", &input.inn));
        }
        if self.repo.find_by_login(&input.login).await?.is_some() {
            return Err(AppError::conflict("company", "login", &input.login));
        }

        let password_hash = self.passwords.hash(&input.password)?;
        let company = Company::create(
            CreateCompanyAttrs {
                title: input.title,
                description: input.description,
                contacts: input.contacts,
                inn: input.inn,
                address: input.address,
                website: input.website,
                logo_url: input.logo_url,
                representative_id: input.representative_id,
                login: input.login,
                password_hash,
            },
            self.clock.now(),
        )?;

        self.repo.save(&company).await?;
        tracing::info!(company_id = %company.id(), login = company.login(), "Company registered");
        Ok(company)
    }

    /// Approves a company. Admin only.
    pub async fn approve(&self, actor: &Actor, id: Uuid) -> AppResult<Company> {
        if !actor.is_admin() {
            tracing::warn!(actor_id = %actor.id, role = %actor.role, company_id = %id, "Approval rejected");
            return Err(AppError::forbidden("only an admin can approve companies"));
        }

        let company = self.load(id).await?.approve(self.clock.now())?;
        self.repo.save(&company).await?;
        tracing::info!(company_id = %id, "Company approved");
        Ok(company)
    }

    /// Authenticates a company and issues a token.
    ///
    /// Unknown login and wrong password are indistinguishable to the caller.
    /// Correct credentials on an unapproved company are rejected by a
    /// business rule.
    pub async fn login(&self, login: &str, password: &str) -> AppResult<Authenticated<Company>> {
        let company = match self.repo.find_by_login(login).await? {
            Some(company) if self.passwords.check(password, company.password_hash())? => company,
            _ => {
                tracing::warn!(login, "Company login failed");
                return Err(AppError::unauthorized("invalid credentials"));
            }
        };

        if !company.is_approved() {
            return Err(AppError::business_rule("company is not approved yet"));
        }

        let token = self
            .tokens
            .generate(company.id(), Role::Company, self.clock.now())?;
        tracing::info!(company_id = %company.id(), "Company logged in");
        Ok(Authenticated {
            entity: company,
            token,
        })
    }

    /// Overwrites the non-empty profile fields. Owner only.
    pub async fn update_profile(
        &self,
        actor: &Actor,
        id: Uuid,
        update: CompanyProfileUpdate,
    ) -> AppResult<Company> {
        if !actor.is_company(id) {
            return Err(AppError::forbidden("only the company itself can edit its profile"));
        }

        let company = self.load(id).await?.update_profile(&update, self.clock.now())?;
        self.repo.save(&company).await?;
        tracing::info!(company_id = %id, "Company profile updated");
        Ok(company)
    }

    /// Changes login and/or password. Owner only.
    ///
    /// Empty values leave the credential unchanged. A new password is
    /// checked against the length policy and re-hashed.
    pub async fn change_credentials(
        &self,
        actor: &Actor,
        id: Uuid,
        login: Option<&str>,
        password: Option<&str>,
    ) -> AppResult<Company> {
        if !actor.is_company(id) {
            return Err(AppError::forbidden("only the company itself can change its credentials"));
        }

        let login = login.filter(|l| !l.is_empty());
        let password = password.filter(|p| !p.is_empty());
        if let Some(password) = password {
            check_password_policy(password)?;
        }

        let company = self.load(id).await?;
        if let Some(new_login) = login.filter(|l| *l != company.login()) {
            if let Some(holder) = self.repo.find_by_login(new_login).await? {
                if holder.id() != id {
                    return Err(AppError::conflict("company", "login", new_login));
                }
            }
        }

        let password_hash = password.map(|p| self.passwords.hash(p)).transpose()?;
        let company = company.change_credentials(login, password_hash.as_deref(), self.clock.now())?;
        self.repo.save(&company).await?;
        tracing::info!(company_id = %id, login_changed = login.is_some(), password_changed = password.is_some(), "Company credentials changed");
        Ok(company)
    }

    pub async fn get(&self, id: Uuid) -> AppResult<Company> {
        tracing::debug!(company_id = %id, "Fetching company");
        self.load(id).await
    }

    /// Lists approved companies, newest first.
    ///
    /// # Arguments
    /// * `limit` - Page size; non-positive values fall back to the default
    /// * `offset` - Number of records to skip
    pub async fn list_approved(&self, limit: i64, offset: i64) -> AppResult<Vec<Company>> {
        self.list(Some(true), limit, offset).await
    }

    /// Lists companies filtered by approval state (`None` lists all).
    pub async fn list(&self, approved: Option<bool>, limit: i64, offset: i64) -> AppResult<Vec<Company>> {
        self.repo
            .list(approved, page_limit(limit), page_offset(offset))
            .await
    }

    pub async fn list_by_representative(&self, representative_id: Uuid) -> AppResult<Vec<Company>> {
        self.repo.list_by_representative(representative_id).await
    }

    /// Deletes a company. Admin or the company itself.
    pub async fn delete(&self, actor: &Actor, id: Uuid) -> AppResult<()> {
        if !actor.is_admin() && !actor.is_company(id) {
            return Err(AppError::forbidden("not allowed to delete this company"));
        }

        if !self.repo.delete(id).await? {
            return Err(AppError::not_found("company", "id", id));
        }
        tracing::info!(company_id = %id, actor_id = %actor.id, "Company deleted");
        Ok(())
    }
}
