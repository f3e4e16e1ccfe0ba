use super::{char_len, check_timestamps, patch_text};
use crate::error::{AppError, AppResult};
use jiff::Timestamp;
use serde::Serialize;
use uuid::Uuid;

const ENTITY: &str = "university";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UniversitySnapshot {
    pub id: Uuid,
    pub title: String,
    pub login: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Free-form; unlike companies no length rule applies.
    pub inn: String,
    pub confirmed: bool,
    pub contacts: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Default)]
pub struct CreateUniversityAttrs {
    pub title: String,
    pub login: String,
    pub password_hash: String,
    pub inn: String,
    pub contacts: String,
}

/// Educational institution account. Starts unconfirmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct University(UniversitySnapshot);

impl University {
    pub fn create(attrs: CreateUniversityAttrs, now: Timestamp) -> AppResult<Self> {
        Self::reconstruct(UniversitySnapshot {
            id: Uuid::new_v4(),
            title: attrs.title,
            login: attrs.login,
            password_hash: attrs.password_hash,
            inn: attrs.inn,
            confirmed: false,
            contacts: attrs.contacts,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn reconstruct(snapshot: UniversitySnapshot) -> AppResult<Self> {
        let university = Self(snapshot);
        university.check_invariants()?;
        Ok(university)
    }

    fn check_invariants(&self) -> AppResult<()> {
        let s = &self.0;
        if s.id.is_nil() {
            return Err(AppError::invariant(ENTITY, "nil id"));
        }
        if !(1..=512).contains(&char_len(&s.title)) {
            return Err(AppError::invariant(ENTITY, "invalid title length"));
        }
        if !(4..=128).contains(&char_len(&s.login)) {
            return Err(AppError::invariant(ENTITY, "invalid login length"));
        }
        if char_len(&s.password_hash) < 10 {
            return Err(AppError::invariant(ENTITY, "weak password hash"));
        }
        check_timestamps(ENTITY, &s.created_at, &s.updated_at)
    }

    pub fn snapshot(&self) -> UniversitySnapshot {
        self.0.clone()
    }

    pub fn id(&self) -> Uuid {
        self.0.id
    }

    pub fn title(&self) -> &str {
        &self.0.title
    }

    pub fn login(&self) -> &str {
        &self.0.login
    }

    pub fn password_hash(&self) -> &str {
        &self.0.password_hash
    }

    pub fn is_confirmed(&self) -> bool {
        self.0.confirmed
    }

    pub fn created_at(&self) -> Timestamp {
        self.0.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.0.updated_at
    }

    pub fn confirm(&self, now: Timestamp) -> AppResult<Self> {
        let mut next = self.snapshot();
        next.confirmed = true;
        next.updated_at = now;
        Self::reconstruct(next)
    }

    pub fn update_profile(
        &self,
        title: Option<&str>,
        contacts: Option<&str>,
        now: Timestamp,
    ) -> AppResult<Self> {
        let mut next = self.snapshot();
        patch_text(&mut next.title, title);
        patch_text(&mut next.contacts, contacts);
        next.updated_at = now;
        Self::reconstruct(next)
    }

    pub fn change_password(&self, password_hash: Option<&str>, now: Timestamp) -> AppResult<Self> {
        let mut next = self.snapshot();
        patch_text(&mut next.password_hash, password_hash);
        next.updated_at = now;
        Self::reconstruct(next)
    }
}
