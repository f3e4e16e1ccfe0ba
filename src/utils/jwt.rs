use jiff::Timestamp;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Actor, Role};
use crate::error::{AppError, AppResult};

/// Bearer token collaborator.
pub trait TokenService: Send + Sync {
    /// Issues a token for `subject` acting as `role`.
    fn generate(&self, subject: Uuid, role: Role, issued_at: Timestamp) -> AppResult<String>;

    /// Decodes a token. Malformed, expired and badly signed tokens are all
    /// `Unauthorized`.
    fn validate(&self, token: &str) -> AppResult<Actor>;
}

/// JWT Claims structure carried by every token
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Subject (account id)
    pub sub: String,
    /// Role the subject acts as
    pub role: Role,
    /// Issued at (timestamp)
    pub iat: i64,
    /// Expiration time (timestamp)
    pub exp: i64,
}

impl Claims {
    /// Creates claims valid for `ttl_hours` from `issued_at`.
    pub fn new(subject: Uuid, role: Role, issued_at: Timestamp, ttl_hours: i64) -> Self {
        let iat = issued_at.as_second();

        Self {
            sub: subject.to_string(),
            role,
            iat,
            exp: iat.saturating_add(ttl_hours.saturating_mul(3600)),
        }
    }
}

/// HS256 tokens signed with a shared secret.
#[derive(Clone)]
pub struct JwtTokenService {
    secret: String,
    ttl_hours: i64,
}

impl JwtTokenService {
    pub fn new(secret: impl Into<String>, ttl_hours: i64) -> Self {
        Self {
            secret: secret.into(),
            ttl_hours,
        }
    }

    /// Decodes and verifies the raw claims.
    pub fn decode_claims(&self, token: &str) -> AppResult<Claims> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                AppError::unauthorized("Token has expired")
            }
            jsonwebtoken::errors::ErrorKind::InvalidToken => AppError::unauthorized("Invalid token"),
            jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                AppError::unauthorized("Invalid token signature")
            }
            _ => AppError::unauthorized(format!("Token validation failed: {}", e)),
        })
    }
}

impl std::fmt::Debug for JwtTokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtTokenService")
            .field("secret", &"<redacted>")
            .field("ttl_hours", &self.ttl_hours)
            .finish()
    }
}

impl TokenService for JwtTokenService {
    fn generate(&self, subject: Uuid, role: Role, issued_at: Timestamp) -> AppResult<String> {
        let claims = Claims::new(subject, role, issued_at, self.ttl_hours);

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal {
            source: anyhow::anyhow!("Failed to generate JWT token: {}", e),
        })
    }

    fn validate(&self, token: &str) -> AppResult<Actor> {
        let claims = self.decode_claims(token)?;
        let id = Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::unauthorized("Invalid token subject"))?;
        Ok(Actor::new(id, claims.role))
    }
}
