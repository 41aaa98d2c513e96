//! Post domain module

pub mod entity;
pub mod repository;

pub use entity::{ImageField, ImageMedia, Post};
pub use repository::{PostRepository, PostSearchParams, PostSearchResult, POST_SORTABLE_FIELDS};
