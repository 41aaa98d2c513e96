//! Post aggregate

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entity::{AggregateRoot, Entity};
use crate::domain::notification::Notification;

const MAX_TITLE_LEN: usize = 255;

/// Stored image reference attached to a post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageMedia {
    /// Original file name
    pub name: String,
    /// Location within the media storage backend
    pub location: String,
}

impl ImageMedia {
    /// Create an image reference
    pub fn new(name: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            location: location.into(),
        }
    }
}

/// Image slots a post exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageField {
    Banner,
    Thumbnail,
    ThumbnailHalf,
}

impl ImageField {
    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Banner => "banner",
            Self::Thumbnail => "thumbnail",
            Self::ThumbnailHalf => "thumbnail_half",
        }
    }
}

impl fmt::Display for ImageField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Post entity written by a user under a category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    /// Unique identifier for the post
    pub id: Uuid,
    /// Authoring user
    pub author_id: Uuid,
    /// Owning category
    pub category_id: Uuid,
    /// Post title; unique across posts
    pub title: String,
    /// Post body
    pub content: String,
    /// Wide banner image
    pub banner: Option<ImageMedia>,
    /// List thumbnail image
    pub thumbnail: Option<ImageMedia>,
    /// Half-size thumbnail image
    pub thumbnail_half: Option<ImageMedia>,
    /// Whether the post is visible to readers
    pub is_published: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last modified timestamp
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Create a new post with a fresh id and no images
    pub fn new(
        author_id: Uuid,
        category_id: Uuid,
        title: impl Into<String>,
        content: impl Into<String>,
        is_published: bool,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            author_id,
            category_id,
            title: title.into(),
            content: content.into(),
            banner: None,
            thumbnail: None,
            thumbnail_half: None,
            is_published,
            created_at: now,
            updated_at: now,
        }
    }

    /// Rebuild a post from stored fields
    #[allow(clippy::too_many_arguments)]
    pub fn restore(
        id: Uuid,
        author_id: Uuid,
        category_id: Uuid,
        title: impl Into<String>,
        content: impl Into<String>,
        banner: Option<ImageMedia>,
        thumbnail: Option<ImageMedia>,
        thumbnail_half: Option<ImageMedia>,
        is_published: bool,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            author_id,
            category_id,
            title: title.into(),
            content: content.into(),
            banner,
            thumbnail,
            thumbnail_half,
            is_published,
            created_at,
            updated_at,
        }
    }

    /// Retitle the post
    pub fn change_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
        self.touch();
    }

    /// Replace the body
    pub fn change_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
        self.touch();
    }

    /// Attach an image to the given slot
    pub fn replace_image(&mut self, field: ImageField, media: ImageMedia) {
        match field {
            ImageField::Banner => self.banner = Some(media),
            ImageField::Thumbnail => self.thumbnail = Some(media),
            ImageField::ThumbnailHalf => self.thumbnail_half = Some(media),
        }
        self.touch();
    }

    /// Make the post visible
    pub fn publish(&mut self) {
        self.is_published = true;
        self.touch();
    }

    /// Hide the post
    pub fn unpublish(&mut self) {
        self.is_published = false;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Entity for Post {
    fn entity_id(&self) -> Uuid {
        self.id
    }

    fn validate(&self) -> Notification {
        let mut notification = Notification::new();

        if self.title.trim().is_empty() {
            notification.add_error("must not be empty", "title");
        }
        if self.title.chars().count() > MAX_TITLE_LEN {
            notification.add_error("must be 255 characters or less", "title");
        }
        if self.content.trim().is_empty() {
            notification.add_error("must not be empty", "content");
        }

        notification
    }
}

impl AggregateRoot for Post {}

impl PartialEq for Post {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Post {}
