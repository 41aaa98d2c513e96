//! Post output projection

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::post::{ImageMedia, Post};

/// Flat projection of a post's public fields
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostOutput {
    pub id: Uuid,
    pub author_id: Uuid,
    pub category_id: Uuid,
    pub title: String,
    pub content: String,
    pub banner: Option<ImageMedia>,
    pub thumbnail: Option<ImageMedia>,
    pub thumbnail_half: Option<ImageMedia>,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PostOutput {
    /// Project an entity into the output shape
    pub fn from_entity(entity: &Post) -> Self {
        Self {
            id: entity.id,
            author_id: entity.author_id,
            category_id: entity.category_id,
            title: entity.title.clone(),
            content: entity.content.clone(),
            banner: entity.banner.clone(),
            thumbnail: entity.thumbnail.clone(),
            thumbnail_half: entity.thumbnail_half.clone(),
            is_published: entity.is_published,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
