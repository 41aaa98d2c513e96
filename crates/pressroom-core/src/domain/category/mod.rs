//! Category domain module

pub mod entity;
pub mod repository;

pub use entity::Category;
pub use repository::{
    CategoryRepository, CategorySearchParams, CategorySearchResult, CATEGORY_SORTABLE_FIELDS,
};
