//! Update user use case

use std::sync::Arc;

use serde::Deserialize;
use uuid::Uuid;

use crate::application::ensure_valid;
use crate::application::ports::PasswordHasher;
use crate::domain::account::UserRepository;
use crate::domain::repository::SearchableRepository;
use crate::error::{Error, Result};

use super::output::UserOutput;

/// Input for [`UpdateUser`]; absent fields are left unchanged
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateUserInput {
    pub id: Uuid,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub is_staff: Option<bool>,
    #[serde(default)]
    pub is_superuser: Option<bool>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

/// Apply a partial update to a user
///
/// An email change re-checks uniqueness; a password change is hashed
/// through the hasher port before reaching the entity.
pub struct UpdateUser<R: UserRepository, H: PasswordHasher> {
    users: Arc<R>,
    hasher: Arc<H>,
}

impl<R: UserRepository, H: PasswordHasher> UpdateUser<R, H> {
    pub fn new(users: Arc<R>, hasher: Arc<H>) -> Self {
        Self { users, hasher }
    }

    pub async fn execute(&self, input: UpdateUserInput) -> Result<UserOutput> {
        let mut user = self
            .users
            .find_by_id(input.id)
            .await?
            .ok_or_else(|| Error::not_found("User", input.id))?;

        if let Some(name) = input.name {
            user.change_name(name);
        }

        if let Some(email) = input.email {
            if email != user.email {
                if self.users.find_by_email(&email).await?.is_some() {
                    return Err(Error::already_exists("User", "email", email));
                }
                user.change_email(email);
            }
        }

        if let Some(password) = input.password {
            let password_hash = self.hasher.hash(&password)?;
            user.change_password(password_hash);
        }

        if let Some(is_staff) = input.is_staff {
            user.change_is_staff(is_staff);
        }
        if let Some(is_superuser) = input.is_superuser {
            user.change_is_superuser(is_superuser);
        }
        match input.is_active {
            Some(true) => user.activate(),
            Some(false) => user.deactivate(),
            None => {}
        }

        ensure_valid(&user)?;
        self.users.update(&user).await?;

        Ok(UserOutput::from_entity(&user))
    }
}
