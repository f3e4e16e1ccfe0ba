//! Credential adapters: password hashing and bearer tokens.

pub mod jwt;
pub mod password;

pub use jwt::{Claims, JwtTokenService, TokenService};
pub use password::{Argon2PasswordService, PasswordService};
