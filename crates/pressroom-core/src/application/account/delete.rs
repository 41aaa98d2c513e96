//! Delete user use case

use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use crate::domain::account::UserRepository;
use crate::domain::repository::SearchableRepository;
use crate::error::{Error, Result};

/// Remove a user by id
pub struct DeleteUser<R: UserRepository> {
    users: Arc<R>,
}

impl<R: UserRepository> DeleteUser<R> {
    pub fn new(users: Arc<R>) -> Self {
        Self { users }
    }

    pub async fn execute(&self, id: Uuid) -> Result<()> {
        let user = self
            .users
            .find_by_id(id)
            .await?
            .ok_or_else(|| Error::not_found("User", id))?;

        self.users.delete(user.id).await?;
        debug!(user_id = %user.id, "user deleted");
        Ok(())
    }
}
