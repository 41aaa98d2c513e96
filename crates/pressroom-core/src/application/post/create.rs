//! Create post use case

use std::sync::Arc;

use serde::Deserialize;
use tracing::debug;
use uuid::Uuid;

use crate::application::ensure_valid;
use crate::application::ports::MediaStorage;
use crate::domain::account::UserRepository;
use crate::domain::category::CategoryRepository;
use crate::domain::post::{ImageField, ImageMedia, Post, PostRepository};
use crate::domain::repository::SearchableRepository;
use crate::error::{Error, Result};

use super::output::PostOutput;

/// Image payload attached to a new post
#[derive(Debug, Clone, Deserialize)]
pub struct ImageUpload {
    /// Which slot the image fills
    pub field: ImageField,
    pub file_name: String,
    #[serde(default)]
    pub content: Vec<u8>,
    pub content_type: String,
}

/// Input for [`CreatePost`]
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePostInput {
    pub author_id: Uuid,
    pub category_id: Uuid,
    pub title: String,
    pub content: String,
    #[serde(default = "default_is_published")]
    pub is_published: bool,
    #[serde(default)]
    pub image: Option<ImageUpload>,
}

fn default_is_published() -> bool {
    true
}

/// Create a post after loading its author and category and checking
/// title uniqueness; an attached image is stored and linked
pub struct CreatePost<P, U, C, S>
where
    P: PostRepository,
    U: UserRepository,
    C: CategoryRepository,
    S: MediaStorage,
{
    posts: Arc<P>,
    users: Arc<U>,
    categories: Arc<C>,
    storage: Arc<S>,
}

impl<P, U, C, S> CreatePost<P, U, C, S>
where
    P: PostRepository,
    U: UserRepository,
    C: CategoryRepository,
    S: MediaStorage,
{
    pub fn new(posts: Arc<P>, users: Arc<U>, categories: Arc<C>, storage: Arc<S>) -> Self {
        Self {
            posts,
            users,
            categories,
            storage,
        }
    }

    pub async fn execute(&self, input: CreatePostInput) -> Result<PostOutput> {
        if self.users.find_by_id(input.author_id).await?.is_none() {
            return Err(Error::not_found("User", input.author_id));
        }
        if self.categories.find_by_id(input.category_id).await?.is_none() {
            return Err(Error::not_found("Category", input.category_id));
        }
        if self.posts.find_by_title(&input.title).await?.is_some() {
            return Err(Error::already_exists("Post", "title", input.title));
        }

        let mut post = Post::new(
            input.author_id,
            input.category_id,
            input.title,
            input.content,
            input.is_published,
        );

        if let Some(upload) = input.image {
            let location = format!("images/{}/{}", post.id, upload.file_name);
            post.replace_image(upload.field, ImageMedia::new(&upload.file_name, &location));
            self.storage
                .store(&location, &upload.content, &upload.content_type)
                .await?;
        }

        ensure_valid(&post)?;
        self.posts.insert(&post).await?;
        debug!(post_id = %post.id, "post created");

        Ok(PostOutput::from_entity(&post))
    }
}
