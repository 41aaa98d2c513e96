//! Category aggregate

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entity::{AggregateRoot, Entity};
use crate::domain::notification::Notification;

const MAX_NAME_LEN: usize = 255;
const MAX_DESCRIPTION_LEN: usize = 1024;

/// Category entity grouping posts by topic
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier for the category
    pub id: Uuid,
    /// Human-readable category name; unique across categories
    pub name: String,
    /// Optional category description
    pub description: Option<String>,
    /// Whether the category is visible to readers
    pub is_active: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last modified timestamp
    pub updated_at: DateTime<Utc>,
}

impl Category {
    /// Create a new category with a fresh id
    pub fn new(name: impl Into<String>, description: Option<String>, is_active: bool) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description,
            is_active,
            created_at: now,
            updated_at: now,
        }
    }

    /// Rebuild a category from stored fields
    pub fn restore(
        id: Uuid,
        name: impl Into<String>,
        description: Option<String>,
        is_active: bool,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description,
            is_active,
            created_at,
            updated_at,
        }
    }

    /// Rename the category
    pub fn change_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.touch();
    }

    /// Replace the description
    pub fn change_description(&mut self, description: Option<String>) {
        self.description = description;
        self.touch();
    }

    /// Make the category visible
    pub fn activate(&mut self) {
        self.is_active = true;
        self.touch();
    }

    /// Hide the category
    pub fn deactivate(&mut self) {
        self.is_active = false;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Entity for Category {
    fn entity_id(&self) -> Uuid {
        self.id
    }

    fn validate(&self) -> Notification {
        let mut notification = Notification::new();

        if self.name.trim().is_empty() {
            notification.add_error("must not be empty", "name");
        }
        if self.name.chars().count() > MAX_NAME_LEN {
            notification.add_error("must be 255 characters or less", "name");
        }
        if let Some(description) = &self.description {
            if description.chars().count() > MAX_DESCRIPTION_LEN {
                notification.add_error("must be 1024 characters or less", "description");
            }
        }

        notification
    }
}

impl AggregateRoot for Category {}

impl PartialEq for Category {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Category {}
