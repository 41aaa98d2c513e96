//! In-memory reference repositories
//!
//! The fully-specified reference implementation of the searchable
//! repository contract; store-backed variants live in `db`.

pub mod account;
pub mod category;
pub mod post;
pub mod store;

pub use account::{InMemoryUserRepository, InMemoryUserTokenRepository};
pub use category::InMemoryCategoryRepository;
pub use post::InMemoryPostRepository;
pub use store::{InMemoryStore, SearchableEntity};
