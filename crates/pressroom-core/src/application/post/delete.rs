//! Delete post use case

use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use crate::domain::post::PostRepository;
use crate::domain::repository::SearchableRepository;
use crate::error::{Error, Result};

/// Remove a post by id
pub struct DeletePost<R: PostRepository> {
    posts: Arc<R>,
}

impl<R: PostRepository> DeletePost<R> {
    pub fn new(posts: Arc<R>) -> Self {
        Self { posts }
    }

    pub async fn execute(&self, id: Uuid) -> Result<()> {
        let post = self
            .posts
            .find_by_id(id)
            .await?
            .ok_or_else(|| Error::not_found("Post", id))?;

        self.posts.delete(post.id).await?;
        debug!(post_id = %post.id, "post deleted");
        Ok(())
    }
}
