//! List posts use case

use std::sync::Arc;

use crate::application::pagination::PaginationOutput;
use crate::domain::post::{PostRepository, PostSearchParams};
use crate::domain::search::RawSearchQuery;
use crate::domain::repository::SearchableRepository;
use crate::error::Result;

use super::output::PostOutput;

/// Paginated, filtered, sorted post listing
pub struct ListPosts<R: PostRepository> {
    posts: Arc<R>,
}

impl<R: PostRepository> ListPosts<R> {
    pub fn new(posts: Arc<R>) -> Self {
        Self { posts }
    }

    pub async fn execute(&self, input: RawSearchQuery) -> Result<PaginationOutput<PostOutput>> {
        let params = PostSearchParams::from_raw(&input);
        let result = self.posts.search(params).await?;

        let items = result.items.iter().map(PostOutput::from_entity).collect();
        Ok(PaginationOutput::from_search_result(items, &result))
    }
}
