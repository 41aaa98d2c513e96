//! Get category use case

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::category::CategoryRepository;
use crate::domain::repository::SearchableRepository;
use crate::error::{Error, Result};

use super::output::CategoryOutput;

/// Fetch a single category by id
pub struct GetCategory<R: CategoryRepository> {
    categories: Arc<R>,
}

impl<R: CategoryRepository> GetCategory<R> {
    pub fn new(categories: Arc<R>) -> Self {
        Self { categories }
    }

    pub async fn execute(&self, id: Uuid) -> Result<CategoryOutput> {
        match self.categories.find_by_id(id).await? {
            Some(category) => Ok(CategoryOutput::from_entity(&category)),
            None => Err(Error::not_found("Category", id)),
        }
    }
}
