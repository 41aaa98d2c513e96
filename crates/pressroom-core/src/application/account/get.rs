//! Get user use case

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::account::UserRepository;
use crate::domain::repository::SearchableRepository;
use crate::error::{Error, Result};

use super::output::UserOutput;

/// Fetch a single user by id
pub struct GetUser<R: UserRepository> {
    users: Arc<R>,
}

impl<R: UserRepository> GetUser<R> {
    pub fn new(users: Arc<R>) -> Self {
        Self { users }
    }

    pub async fn execute(&self, id: Uuid) -> Result<UserOutput> {
        match self.users.find_by_id(id).await? {
            Some(user) => Ok(UserOutput::from_entity(&user)),
            None => Err(Error::not_found("User", id)),
        }
    }
}
