//! University service.
//!
//! Mirrors the company account flow without an approval gate: sign-up
//! returns a token straight away.

use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use super::{Authenticated, check_password_policy, page_limit, page_offset};
use crate::domain::{Actor, Clock, CreateUniversityAttrs, Role, University};
use crate::error::{AppError, AppResult};
use crate::repositories::UniversityRepository;
use crate::utils::{PasswordService, TokenService};

#[derive(Debug, Clone, Default, Validate)]
pub struct SignUpUniversityInput {
    pub login: String,
    #[validate(length(min = 8, max = 64, message = "invalid password length"))]
    pub password: String,
    pub title: String,
    pub inn: String,
    pub contacts: String,
}

#[derive(Clone)]
pub struct UniversityService {
    repo: Arc<dyn UniversityRepository>,
    passwords: Arc<dyn PasswordService>,
    tokens: Arc<dyn TokenService>,
    clock: Arc<dyn Clock>,
}

impl UniversityService {
    pub fn new(
        repo: Arc<dyn UniversityRepository>,
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

    async fn load(&self, id: Uuid) -> AppResult<University> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("university", "id", id))
    }

    fn issue(&self, university: University) -> AppResult<Authenticated<University>> {
        let token = self
            .tokens
            .generate(university.id(), Role::University, self.clock.now())?;
        Ok(Authenticated {
            entity: university,
            token,
        })
    }

    /// Creates a university account and signs it in.
    ///
    /// # Returns
    /// The persisted university with a fresh token
    pub async fn sign_up(&self, input: SignUpUniversityInput) -> AppResult<Authenticated<University>> {
        input.validate()?;

        if self.repo.find_by_login(&input.login).await?.is_some() {
            return Err(AppError::conflict("university", "login", &input.login));
        }

        let password_hash = self.passwords.hash(&input.password)?;
        let university = University::create(
            CreateUniversityAttrs {
                title: input.title,
                login: input.login,
                password_hash,
                inn: input.inn,
                contacts: input.contacts,
            },
            self.clock.now(),
        )?;

        self.repo.save(&university).await?;
        tracing::info!(university_id = %university.id(), login = university.login(), "University signed up");
        self.issue(university)
    }

    pub async fn sign_in(&self, login: &str, password: &str) -> AppResult<Authenticated<University>> {
        let university = match self.repo.find_by_login(login).await? {
            Some(u) if self.passwords.check(password, u.password_hash())? => u,
            _ => {
                tracing::warn!(login, "University sign-in failed");
                return Err(AppError::unauthorized("invalid credentials"));
            }
        };

        tracing::info!(university_id = %university.id(), "University signed in");
        self.issue(university)
    }

    /// Replaces the password of the signed-in university after verifying
    /// the current one.
    pub async fn change_password(
        &self,
        actor: &Actor,
        current_password: &str,
        new_password: &str,
    ) -> AppResult<University> {
        if actor.role != Role::University {
            return Err(AppError::forbidden("only a university can change its password"));
        }

        let university = self.load(actor.id).await?;
        if !self.passwords.check(current_password, university.password_hash())? {
            tracing::warn!(university_id = %actor.id, "Password change with wrong current password");
            return Err(AppError::unauthorized("current password does not match"));
        }
        check_password_policy(new_password)?;

        let password_hash = self.passwords.hash(new_password)?;
        let university = university.change_password(Some(&password_hash), self.clock.now())?;
        self.repo.save(&university).await?;
        tracing::info!(university_id = %actor.id, "University password changed");
        Ok(university)
    }

    /// Overwrites title and contacts when non-empty.
    ///
    /// Allowed for an admin or the university itself; a rejected call
    /// touches nothing.
    pub async fn update_profile(
        &self,
        actor: &Actor,
        id: Uuid,
        title: Option<&str>,
        contacts: Option<&str>,
    ) -> AppResult<University> {
        if !actor.is_admin() && !actor.is_university(id) {
            tracing::warn!(actor_id = %actor.id, role = %actor.role, university_id = %id, "Profile update rejected");
            return Err(AppError::forbidden("only an admin or the university itself can edit its profile"));
        }

        let university = self
            .load(id)
            .await?
            .update_profile(title, contacts, self.clock.now())?;
        self.repo.save(&university).await?;
        tracing::info!(university_id = %id, actor_id = %actor.id, "University profile updated");
        Ok(university)
    }

    /// Marks a university as confirmed. Admin only.
    pub async fn confirm(&self, actor: &Actor, id: Uuid) -> AppResult<University> {
        if !actor.is_admin() {
            tracing::warn!(actor_id = %actor.id, role = %actor.role, university_id = %id, "Confirmation rejected");
            return Err(AppError::forbidden("only an admin can confirm universities"));
        }

        let university = self.load(id).await?.confirm(self.clock.now())?;
        self.repo.save(&university).await?;
        tracing::info!(university_id = %id, "University confirmed");
        Ok(university)
    }

    pub async fn get(&self, id: Uuid) -> AppResult<University> {
        tracing::debug!(university_id = %id, "Fetching university");
        self.load(id).await
    }

    pub async fn list(&self, limit: i64, offset: i64) -> AppResult<Vec<University>> {
        self.repo.list(page_limit(limit), page_offset(offset)).await
    }
}
