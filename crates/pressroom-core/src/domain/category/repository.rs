//! Category repository contract

use async_trait::async_trait;

use crate::domain::repository::SearchableRepository;
use crate::domain::search::{SearchParams, SearchResult};
use crate::error::Result;

use super::entity::Category;

/// Fields a category listing may sort by
pub const CATEGORY_SORTABLE_FIELDS: &[&str] = &["name", "created_at"];

/// Search params for categories; the filter is a case-insensitive
/// substring match on the name
pub type CategorySearchParams = SearchParams<String>;

/// Search result page of categories
pub type CategorySearchResult = SearchResult<Category>;

/// Repository contract for categories
#[async_trait]
pub trait CategoryRepository: SearchableRepository<Entity = Category, Filter = String> {
    /// Exact-name lookup used for uniqueness checks
    async fn find_by_name(&self, name: &str) -> Result<Option<Category>>;
}
