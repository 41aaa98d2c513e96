//! SQLite-backed repositories
//!
//! Store-backed variants of the repository contracts; the search
//! contract compiles to `LIKE`/`ORDER BY`/`LIMIT`/`OFFSET` with the
//! total counted before slicing, matching the in-memory reference.

pub mod account;
pub mod category;
pub mod database;
pub mod migrations;
pub mod post;
mod sql;

pub use account::{SqliteUserRepository, SqliteUserTokenRepository};
pub use category::SqliteCategoryRepository;
pub use database::{Database, DatabaseConfig};
pub use post::SqlitePostRepository;
