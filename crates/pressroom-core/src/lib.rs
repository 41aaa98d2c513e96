//! Pressroom Core Library
//!
//! This crate provides the core functionality for Pressroom, including:
//! - Domain aggregates (categories, users, posts, refresh tokens)
//! - The generic searchable-repository contract with filtered, sorted,
//!   paginated listing
//! - Total normalization of raw pagination/sort/filter input
//! - Use cases (one per operation) orchestrating repositories,
//!   validation, and output projection
//! - In-memory reference repositories and SQLite-backed variants
//! - Security adapters (Argon2 hashing, Ed25519 token signing)

pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::{Error, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::application::PaginationOutput;
    pub use crate::domain::{
        Notification, RawSearchQuery, SearchParams, SearchResult, SearchableRepository,
        SortDirection,
    };
    pub use crate::error::{Error, Result};
}
