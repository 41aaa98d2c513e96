//! List users use case

use std::sync::Arc;

use crate::application::pagination::PaginationOutput;
use crate::domain::account::{UserRepository, UserSearchParams};
use crate::domain::search::RawSearchQuery;
use crate::domain::repository::SearchableRepository;
use crate::error::Result;

use super::output::UserOutput;

/// Paginated, filtered, sorted user listing
///
/// The raw filter must be a mapping; recognized keys combine with
/// logical AND (see `UserFilter`).
pub struct ListUsers<R: UserRepository> {
    users: Arc<R>,
}

impl<R: UserRepository> ListUsers<R> {
    pub fn new(users: Arc<R>) -> Self {
        Self { users }
    }

    pub async fn execute(&self, input: RawSearchQuery) -> Result<PaginationOutput<UserOutput>> {
        let params = UserSearchParams::from_raw(&input);
        let result = self.users.search(params).await?;

        let items = result.items.iter().map(UserOutput::from_entity).collect();
        Ok(PaginationOutput::from_search_result(items, &result))
    }
}
