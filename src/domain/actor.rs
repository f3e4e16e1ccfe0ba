use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Closed set of principal roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Company,
    University,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Company => "company",
            Role::University => "university",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AppError;

    /// Exact match only. Role strings are part of the token contract.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "company" => Ok(Role::Company),
            "university" => Ok(Role::University),
            "admin" => Ok(Role::Admin),
            _ => Err(AppError::invariant("actor", "invalid role")),
        }
    }
}

/// Authenticated principal handed to services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: Uuid,
    pub role: Role,
}

impl Actor {
    pub fn new(id: Uuid, role: Role) -> Self {
        Self { id, role }
    }

    /// Operator principal used by the admin CLI.
    pub fn admin() -> Self {
        Self {
            id: Uuid::nil(),
            role: Role::Admin,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// True when this actor is the given company account.
    pub fn is_company(&self, company_id: Uuid) -> bool {
        self.role == Role::Company && self.id == company_id
    }

    pub fn is_university(&self, university_id: Uuid) -> bool {
        self.role == Role::University && self.id == university_id
    }
}
