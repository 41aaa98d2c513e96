//! Create user use case

use std::sync::Arc;

use serde::Deserialize;
use tracing::debug;

use crate::application::ensure_valid;
use crate::application::ports::PasswordHasher;
use crate::domain::account::{User, UserRepository};
use crate::domain::repository::SearchableRepository;
use crate::error::{Error, Result};

use super::output::UserOutput;

/// Input for [`CreateUser`]
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserInput {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub is_staff: bool,
    #[serde(default)]
    pub is_superuser: bool,
    #[serde(default = "default_is_active")]
    pub is_active: bool,
}

fn default_is_active() -> bool {
    true
}

/// Create a user after checking email uniqueness; the password is
/// hashed before the entity sees it
pub struct CreateUser<R: UserRepository, H: PasswordHasher> {
    users: Arc<R>,
    hasher: Arc<H>,
}

impl<R: UserRepository, H: PasswordHasher> CreateUser<R, H> {
    pub fn new(users: Arc<R>, hasher: Arc<H>) -> Self {
        Self { users, hasher }
    }

    pub async fn execute(&self, input: CreateUserInput) -> Result<UserOutput> {
        if self.users.find_by_email(&input.email).await?.is_some() {
            return Err(Error::already_exists("User", "email", input.email));
        }

        let password_hash = self.hasher.hash(&input.password)?;
        let user = User::new(input.name, input.email, password_hash)
            .with_staff(input.is_staff)
            .with_superuser(input.is_superuser)
            .with_active(input.is_active);
        ensure_valid(&user)?;

        self.users.insert(&user).await?;
        debug!(user_id = %user.id, "user created");

        Ok(UserOutput::from_entity(&user))
    }
}
