//! User aggregate

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entity::{AggregateRoot, Entity};
use crate::domain::notification::Notification;

const MAX_NAME_LEN: usize = 255;
const MAX_EMAIL_LEN: usize = 255;

/// User account entity
///
/// `password_hash` holds the hashed secret only; the plain password
/// never reaches the entity, and the hash never reaches an output
/// projection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Email address; unique across users
    pub email: String,
    /// Hashed password (PHC string)
    pub password_hash: String,
    /// Whether the user may access the admin surface
    pub is_staff: bool,
    /// Whether the user bypasses permission checks
    pub is_superuser: bool,
    /// Whether the account is enabled
    pub is_active: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last modified timestamp
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new regular, active user with a fresh id
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            email: email.into(),
            password_hash: password_hash.into(),
            is_staff: false,
            is_superuser: false,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Set the staff flag
    pub fn with_staff(mut self, is_staff: bool) -> Self {
        self.is_staff = is_staff;
        self
    }

    /// Set the superuser flag
    pub fn with_superuser(mut self, is_superuser: bool) -> Self {
        self.is_superuser = is_superuser;
        self
    }

    /// Set the active flag
    pub fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    /// Rebuild a user from stored fields
    #[allow(clippy::too_many_arguments)]
    pub fn restore(
        id: Uuid,
        name: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
        is_staff: bool,
        is_superuser: bool,
        is_active: bool,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            password_hash: password_hash.into(),
            is_staff,
            is_superuser,
            is_active,
            created_at,
            updated_at,
        }
    }

    /// Rename the user
    pub fn change_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.touch();
    }

    /// Replace the email address
    pub fn change_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
        self.touch();
    }

    /// Replace the stored password hash
    pub fn change_password(&mut self, password_hash: impl Into<String>) {
        self.password_hash = password_hash.into();
        self.touch();
    }

    /// Set the staff flag
    pub fn change_is_staff(&mut self, is_staff: bool) {
        self.is_staff = is_staff;
        self.touch();
    }

    /// Set the superuser flag
    pub fn change_is_superuser(&mut self, is_superuser: bool) {
        self.is_superuser = is_superuser;
        self.touch();
    }

    /// Enable the account
    pub fn activate(&mut self) {
        self.is_active = true;
        self.touch();
    }

    /// Disable the account
    pub fn deactivate(&mut self) {
        self.is_active = false;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Entity for User {
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
        if self.email.trim().is_empty() {
            notification.add_error("must not be empty", "email");
        } else if !self.email.contains('@') {
            notification.add_error("must contain '@'", "email");
        }
        if self.email.chars().count() > MAX_EMAIL_LEN {
            notification.add_error("must be 255 characters or less", "email");
        }
        if self.password_hash.is_empty() {
            notification.add_error("must not be empty", "password_hash");
        }

        notification
    }
}

impl AggregateRoot for User {}

impl PartialEq for User {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for User {}
