//! Get post use case

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::post::PostRepository;
use crate::domain::repository::SearchableRepository;
use crate::error::{Error, Result};

use super::output::PostOutput;

/// Fetch a single post by id
pub struct GetPost<R: PostRepository> {
    posts: Arc<R>,
}

impl<R: PostRepository> GetPost<R> {
    pub fn new(posts: Arc<R>) -> Self {
        Self { posts }
    }

    pub async fn execute(&self, id: Uuid) -> Result<PostOutput> {
        match self.posts.find_by_id(id).await? {
            Some(post) => Ok(PostOutput::from_entity(&post)),
            None => Err(Error::not_found("Post", id)),
        }
    }
}
