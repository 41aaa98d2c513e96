//! Update post use case

use std::sync::Arc;

use serde::Deserialize;
use uuid::Uuid;

use crate::application::ensure_valid;
use crate::domain::post::PostRepository;
use crate::domain::repository::SearchableRepository;
use crate::error::{Error, Result};

use super::output::PostOutput;

/// Input for [`UpdatePost`]; absent fields are left unchanged
#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePostInput {
    pub id: Uuid,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub is_published: Option<bool>,
}

/// Apply a partial update to a post
///
/// A title change re-checks uniqueness before mutation.
pub struct UpdatePost<R: PostRepository> {
    posts: Arc<R>,
}

impl<R: PostRepository> UpdatePost<R> {
    pub fn new(posts: Arc<R>) -> Self {
        Self { posts }
    }

    pub async fn execute(&self, input: UpdatePostInput) -> Result<PostOutput> {
        let mut post = self
            .posts
            .find_by_id(input.id)
            .await?
            .ok_or_else(|| Error::not_found("Post", input.id))?;

        if let Some(title) = input.title {
            if title != post.title {
                if self.posts.find_by_title(&title).await?.is_some() {
                    return Err(Error::already_exists("Post", "title", title));
                }
                post.change_title(title);
            }
        }

        if let Some(content) = input.content {
            post.change_content(content);
        }
        match input.is_published {
            Some(true) => post.publish(),
            Some(false) => post.unpublish(),
            None => {}
        }

        ensure_valid(&post)?;
        self.posts.update(&post).await?;

        Ok(PostOutput::from_entity(&post))
    }
}
