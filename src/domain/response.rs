use super::{char_len, check_timestamps, patch_text};
use crate::error::{AppError, AppResult};
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

const ENTITY: &str = "response";

/// Review state of a candidate submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    New,
    Viewed,
    Rejected,
    Accepted,
}

impl ResponseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseStatus::New => "new",
            ResponseStatus::Viewed => "viewed",
            ResponseStatus::Rejected => "rejected",
            ResponseStatus::Accepted => "accepted",
        }
    }
}

impl fmt::Display for ResponseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResponseStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(ResponseStatus::New),
            "viewed" => Ok(ResponseStatus::Viewed),
            "rejected" => Ok(ResponseStatus::Rejected),
            "accepted" => Ok(ResponseStatus::Accepted),
            _ => Err(AppError::invariant(ENTITY, "invalid status")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResponseSnapshot {
    pub id: Uuid,
    pub vacancy_id: Uuid,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub cover_letter: String,
    pub resume_url: String,
    pub status: ResponseStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Default)]
pub struct CreateResponseAttrs {
    pub vacancy_id: Uuid,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub cover_letter: String,
    pub resume_url: String,
}

/// Search criteria. `status` stays a string so unlisted values can be
/// rejected rather than dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseFilter {
    pub vacancy_id: Option<Uuid>,
    pub status: Option<String>,
    pub limit: i64,
    pub offset: i64,
}

impl ResponseFilter {
    /// Parsed status criterion; fails on a value outside the closed set.
    pub fn parsed_status(&self) -> AppResult<Option<ResponseStatus>> {
        self.status.as_deref().map(str::parse).transpose()
    }
}

/// Candidate submission to a vacancy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response(ResponseSnapshot);

impl Response {
    pub fn create(attrs: CreateResponseAttrs, now: Timestamp) -> AppResult<Self> {
        Self::reconstruct(ResponseSnapshot {
            id: Uuid::new_v4(),
            vacancy_id: attrs.vacancy_id,
            full_name: attrs.full_name,
            email: attrs.email,
            phone: attrs.phone,
            cover_letter: attrs.cover_letter,
            resume_url: attrs.resume_url,
            status: ResponseStatus::New,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn reconstruct(snapshot: ResponseSnapshot) -> AppResult<Self> {
        let response = Self(snapshot);
        response.check_invariants()?;
        Ok(response)
    }

    fn check_invariants(&self) -> AppResult<()> {
        let s = &self.0;
        if s.id.is_nil() {
            return Err(AppError::invariant(ENTITY, "nil id"));
        }
        if s.vacancy_id.is_nil() {
            return Err(AppError::invariant(ENTITY, "nil vacancy id"));
        }
        if !(1..=256).contains(&char_len(&s.full_name)) {
            return Err(AppError::invariant(ENTITY, "invalid full_name length"));
        }
        if !(3..=256).contains(&char_len(&s.email)) {
            return Err(AppError::invariant(ENTITY, "invalid email length"));
        }
        check_timestamps(ENTITY, &s.created_at, &s.updated_at)
    }

    pub fn snapshot(&self) -> ResponseSnapshot {
        self.0.clone()
    }

    pub fn id(&self) -> Uuid {
        self.0.id
    }

    pub fn vacancy_id(&self) -> Uuid {
        self.0.vacancy_id
    }

    pub fn status(&self) -> ResponseStatus {
        self.0.status
    }

    pub fn created_at(&self) -> Timestamp {
        self.0.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.0.updated_at
    }

    /// Moves to `status`, which must be one of `new`, `viewed`, `rejected`
    /// or `accepted`.
    pub fn set_status(&self, status: &str, now: Timestamp) -> AppResult<Self> {
        let mut next = self.snapshot();
        next.status = status.parse()?;
        next.updated_at = now;
        Self::reconstruct(next)
    }

    pub fn update_contacts(
        &self,
        full_name: Option<&str>,
        email: Option<&str>,
        phone: Option<&str>,
        now: Timestamp,
    ) -> AppResult<Self> {
        let mut next = self.snapshot();
        patch_text(&mut next.full_name, full_name);
        patch_text(&mut next.email, email);
        patch_text(&mut next.phone, phone);
        next.updated_at = now;
        Self::reconstruct(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> Timestamp {
        "2024-06-01T15:00:00Z".parse::<Timestamp>().unwrap()
    }

    fn attrs() -> CreateResponseAttrs {
        CreateResponseAttrs {
            vacancy_id: Uuid::new_v4(),
            full_name: "Ada Lovelace".to_string(),
            email: "ada@example.test".to_string(),
            phone: "+100000000".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_create_starts_new() {
        let response = Response::create(attrs(), now()).unwrap();
        assert_eq!(response.status(), ResponseStatus::New);
    }

    #[test]
    fn test_set_status_closed_set() {
        let response = Response::create(attrs(), now()).unwrap();

        let err = response.set_status("bogus", now()).unwrap_err();
        assert_eq!(err.invariant_reason(), Some("invalid status"));

        let accepted = response.set_status("accepted", now()).unwrap();
        assert_eq!(accepted.status(), ResponseStatus::Accepted);
        assert_eq!(accepted.snapshot().status.as_str(), "accepted");
    }

    #[test]
    fn test_contact_lengths() {
        let mut a = attrs();
        a.email = "ab".to_string();
        let err = Response::create(a, now()).unwrap_err();
        assert_eq!(err.invariant_reason(), Some("invalid email length"));

        let mut a = attrs();
        a.full_name = "я".repeat(257);
        let err = Response::create(a, now()).unwrap_err();
        assert_eq!(err.invariant_reason(), Some("invalid full_name length"));

        let mut a = attrs();
        a.full_name = "я".repeat(256);
        assert!(Response::create(a, now()).is_ok());
    }

    #[test]
    fn test_update_contacts_partial() {
        let response = Response::create(attrs(), now()).unwrap();
        let updated = response
            .update_contacts(None, Some("ada@lovelace.test"), Some(""), now())
            .unwrap();
        let snapshot = updated.snapshot();
        assert_eq!(snapshot.full_name, "Ada Lovelace");
        assert_eq!(snapshot.email, "ada@lovelace.test");
        assert_eq!(snapshot.phone, "+100000000");
    }

    #[test]
    fn test_filter_status_parsing() {
        let filter = ResponseFilter {
            status: Some("viewed".to_string()),
            ..Default::default()
        };
        assert_eq!(filter.parsed_status().unwrap(), Some(ResponseStatus::Viewed));

        let filter = ResponseFilter {
            status: Some("archived".to_string()),
            ..Default::default()
        };
        assert!(filter.parsed_status().is_err());
        assert_eq!(ResponseFilter::default().parsed_status().unwrap(), None);
    }
}
