//! Job board core: companies, universities, vacancies and candidate
//! responses, with PostgreSQL persistence and an administration CLI.

use shadow_rs::shadow;
shadow!(build);

pub mod cli;
pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod logger;
pub mod models;
pub mod repositories;
pub mod schema;
pub mod services;
pub mod state;
pub mod utils;

pub use error::{AppError, AppResult, ErrorKind};
pub use state::AppState;

pub fn pkg_version() -> &'static str {
    build::PKG_VERSION
}
