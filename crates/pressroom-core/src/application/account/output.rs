//! User output projection

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::account::User;

/// Flat projection of a user's public fields
///
/// The password hash is strictly never part of this projection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserOutput {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserOutput {
    /// Project an entity into the output shape
    pub fn from_entity(entity: &User) -> Self {
        Self {
            id: entity.id,
            name: entity.name.clone(),
            email: entity.email.clone(),
            is_staff: entity.is_staff,
            is_superuser: entity.is_superuser,
            is_active: entity.is_active,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
