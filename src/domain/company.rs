use super::{char_len, check_timestamps, patch_text};
use crate::error::{AppError, AppResult};
use jiff::Timestamp;
use serde::Serialize;
use uuid::Uuid;

const ENTITY: &str = "company";

/// Full field set of a company at one instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompanySnapshot {
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
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Default)]
pub struct CreateCompanyAttrs {
    pub title: String,
    pub description: String,
    pub contacts: String,
    pub inn: String,
    pub address: String,
    pub website: String,
    pub logo_url: String,
    pub representative_id: Uuid,
    pub login: String,
    pub password_hash: String,
}

/// Profile fields to overwrite. `None` and empty strings leave a field as is.
#[derive(Debug, Clone, Default)]
pub struct CompanyProfileUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub contacts: Option<String>,
    pub address: Option<String>,
    pub website: Option<String>,
    pub logo_url: Option<String>,
}

/// Employer account. Starts unapproved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Company(CompanySnapshot);

impl Company {
    pub fn create(attrs: CreateCompanyAttrs, now: Timestamp) -> AppResult<Self> {
        Self::reconstruct(CompanySnapshot {
            id: Uuid::new_v4(),
            title: attrs.title,
            description: attrs.description,
            contacts: attrs.contacts,
            inn: attrs.inn,
            address: attrs.address,
            website: attrs.website,
            logo_url: attrs.logo_url,
            approved: false,
            representative_id: attrs.representative_id,
            login: attrs.login,
            password_hash: attrs.password_hash,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn reconstruct(snapshot: CompanySnapshot) -> AppResult<Self> {
        let company = Self(snapshot);
        company.check_invariants()?;
        Ok(company)
    }

    fn check_invariants(&self) -> AppResult<()> {
        let s = &self.0;
        if s.id.is_nil() {
            return Err(AppError::invariant(ENTITY, "nil id"));
        }
        if !(1..=512).contains(&char_len(&s.title)) {
            return Err(AppError::invariant(ENTITY, "invalid title length"));
        }
        if char_len(&s.inn) != 10 {
            return Err(AppError::invariant(ENTITY, "invalid INN length"));
        }
        if !(4..=128).contains(&char_len(&s.login)) {
            return Err(AppError::invariant(ENTITY, "invalid login length"));
        }
        if char_len(&s.password_hash) < 10 {
            return Err(AppError::invariant(ENTITY, "weak password hash"));
        }
        check_timestamps(ENTITY, &s.created_at, &s.updated_at)
    }

    pub fn snapshot(&self) -> CompanySnapshot {
        self.0.clone()
    }

    pub fn id(&self) -> Uuid {
        self.0.id
    }

    pub fn title(&self) -> &str {
        &self.0.title
    }

    pub fn inn(&self) -> &str {
        &self.0.inn
    }

    pub fn login(&self) -> &str {
        &self.0.login
    }

    pub fn password_hash(&self) -> &str {
        &self.0.password_hash
    }

    pub fn is_approved(&self) -> bool {
        self.0.approved
    }

    pub fn representative_id(&self) -> Uuid {
        self.0.representative_id
    }

    pub fn created_at(&self) -> Timestamp {
        self.0.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.0.updated_at
    }

    pub fn approve(&self, now: Timestamp) -> AppResult<Self> {
        let mut next = self.snapshot();
        next.approved = true;
        next.updated_at = now;
        Self::reconstruct(next)
    }

    pub fn update_profile(&self, update: &CompanyProfileUpdate, now: Timestamp) -> AppResult<Self> {
        let mut next = self.snapshot();
        patch_text(&mut next.title, update.title.as_deref());
        patch_text(&mut next.description, update.description.as_deref());
        patch_text(&mut next.contacts, update.contacts.as_deref());
        patch_text(&mut next.address, update.address.as_deref());
        patch_text(&mut next.website, update.website.as_deref());
        patch_text(&mut next.logo_url, update.logo_url.as_deref());
        next.updated_at = now;
        Self::reconstruct(next)
    }

    pub fn change_credentials(
        &self,
        login: Option<&str>,
        password_hash: Option<&str>,
        now: Timestamp,
    ) -> AppResult<Self> {
        let mut next = self.snapshot();
        patch_text(&mut next.login, login);
        patch_text(&mut next.password_hash, password_hash);
        next.updated_at = now;
        Self::reconstruct(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::SignedDuration;

    fn now() -> Timestamp {
        "2024-03-01T09:00:00Z".parse::<Timestamp>().unwrap()
    }

    fn attrs() -> CreateCompanyAttrs {
        CreateCompanyAttrs {
            title: "Acme".to_string(),
            description: "Rockets".to_string(),
            contacts: "hr@acme.test".to_string(),
            inn: "1234567890".to_string(),
            address: "Main st. 1".to_string(),
            website: "https://acme.test".to_string(),
            logo_url: String::new(),
            representative_id: Uuid::new_v4(),
            login: "acme".to_string(),
            password_hash: "hashed:secret-password".to_string(),
        }
    }

    fn reason(result: AppResult<Company>) -> String {
        result
            .unwrap_err()
            .invariant_reason()
            .map(str::to_string)
            .unwrap_or_default()
    }

    #[test]
    fn test_create_starts_unapproved_with_equal_timestamps() {
        let company = Company::create(attrs(), now()).unwrap();
        assert!(!company.is_approved());
        assert!(!company.id().is_nil());
        assert_eq!(company.created_at(), now());
        assert_eq!(company.updated_at(), now());
    }

    #[test]
    fn test_create_rejects_invalid_fields() {
        let mut a = attrs();
        a.inn = "123".to_string();
        assert_eq!(reason(Company::create(a, now())), "invalid INN length");

        let mut a = attrs();
        a.title = String::new();
        assert_eq!(reason(Company::create(a, now())), "invalid title length");

        let mut a = attrs();
        a.title = "x".repeat(513);
        assert_eq!(reason(Company::create(a, now())), "invalid title length");

        let mut a = attrs();
        a.login = "abc".to_string();
        assert_eq!(reason(Company::create(a, now())), "invalid login length");

        let mut a = attrs();
        a.password_hash = "short".to_string();
        assert_eq!(reason(Company::create(a, now())), "weak password hash");

        assert_eq!(
            reason(Company::create(attrs(), Timestamp::default())),
            "zero creation time"
        );
    }

    #[test]
    fn test_reconstruct_rejects_reversed_timestamps() {
        let mut snapshot = Company::create(attrs(), now()).unwrap().snapshot();
        snapshot.created_at = now() + SignedDuration::from_secs(1);
        assert_eq!(
            reason(Company::reconstruct(snapshot)),
            "creation time is after updation time"
        );
    }

    #[test]
    fn test_approve_stamps_update_time() {
        let company = Company::create(attrs(), now()).unwrap();
        let later = now() + SignedDuration::from_hours(1);
        let approved = company.approve(later).unwrap();

        assert!(approved.is_approved());
        assert_eq!(approved.updated_at(), later);
        assert_eq!(approved.created_at(), company.created_at());
        assert!(!company.is_approved());
    }

    #[test]
    fn test_update_profile_ignores_empty_values() {
        let company = Company::create(attrs(), now()).unwrap();
        let update = CompanyProfileUpdate {
            title: Some("Acme Corp".to_string()),
            description: Some(String::new()),
            logo_url: Some("https://acme.test/logo.png".to_string()),
            ..Default::default()
        };
        let updated = company.update_profile(&update, now()).unwrap();

        let before = company.snapshot();
        let after = updated.snapshot();
        assert_eq!(after.title, "Acme Corp");
        assert_eq!(after.description, before.description);
        assert_eq!(after.logo_url, "https://acme.test/logo.png");
        assert_eq!(after.contacts, before.contacts);
    }

    #[test]
    fn test_change_credentials_keeps_original_on_failure() {
        let company = Company::create(attrs(), now()).unwrap();
        let result = company.change_credentials(Some("ab"), None, now());
        assert_eq!(reason(result), "invalid login length");
        assert_eq!(company.login(), "acme");

        let changed = company
            .change_credentials(None, Some("hashed:another-password"), now())
            .unwrap();
        assert_eq!(changed.login(), "acme");
        assert_eq!(changed.password_hash(), "hashed:another-password");
    }
}
