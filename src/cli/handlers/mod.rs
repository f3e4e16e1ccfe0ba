//! One handler per command family. Handlers return their output instead of
//! printing it, except for migrations, which report progress as they go.

pub mod admin;
pub mod check;
pub mod migrate;
pub mod token;

pub use admin::AdminCommandHandler;
pub use check::{CheckCommandHandler, CheckReport};
pub use migrate::MigrateCommandHandler;
pub use token::TokenCommandHandler;
