//! Refresh token aggregate

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entity::{AggregateRoot, Entity};
use crate::domain::notification::Notification;

/// Lifetime of an issued token in seconds
pub const TOKEN_TTL_SECS: i64 = 3600;

/// Refresh token issued to an authenticated user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserToken {
    /// Unique identifier for the token row
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// Opaque signed token string
    pub refresh_token: String,
    /// Expiration timestamp
    pub expires_at: DateTime<Utc>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl UserToken {
    /// Create a token for a user, expiring [`TOKEN_TTL_SECS`] from now
    pub fn new(user_id: Uuid, refresh_token: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            refresh_token: refresh_token.into(),
            expires_at: now + Duration::seconds(TOKEN_TTL_SECS),
            created_at: now,
        }
    }

    /// Rebuild a token from stored fields
    pub fn restore(
        id: Uuid,
        user_id: Uuid,
        refresh_token: impl Into<String>,
        expires_at: DateTime<Utc>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            refresh_token: refresh_token.into(),
            expires_at,
            created_at,
        }
    }

    /// Whether the token has expired at the given instant
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

impl Entity for UserToken {
    fn entity_id(&self) -> Uuid {
        self.id
    }

    fn validate(&self) -> Notification {
        let mut notification = Notification::new();
        if self.refresh_token.is_empty() {
            notification.add_error("must not be empty", "refresh_token");
        }
        notification
    }
}

impl AggregateRoot for UserToken {}

impl PartialEq for UserToken {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for UserToken {}
