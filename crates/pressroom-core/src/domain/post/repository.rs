//! Post repository contract

use async_trait::async_trait;

use crate::domain::repository::SearchableRepository;
use crate::domain::search::{SearchParams, SearchResult};
use crate::error::Result;

use super::entity::Post;

/// Fields a post listing may sort by
pub const POST_SORTABLE_FIELDS: &[&str] = &["title", "created_at"];

/// Search params for posts; the filter is a case-insensitive substring
/// match on the title
pub type PostSearchParams = SearchParams<String>;

/// Search result page of posts
pub type PostSearchResult = SearchResult<Post>;

/// Repository contract for posts
#[async_trait]
pub trait PostRepository: SearchableRepository<Entity = Post, Filter = String> {
    /// Exact-title lookup used for uniqueness checks
    async fn find_by_title(&self, title: &str) -> Result<Option<Post>>;
}
