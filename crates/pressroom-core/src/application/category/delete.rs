//! Delete category use case

use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use crate::domain::category::CategoryRepository;
use crate::domain::repository::SearchableRepository;
use crate::error::{Error, Result};

/// Remove a category by id
pub struct DeleteCategory<R: CategoryRepository> {
    categories: Arc<R>,
}

impl<R: CategoryRepository> DeleteCategory<R> {
    pub fn new(categories: Arc<R>) -> Self {
        Self { categories }
    }

    pub async fn execute(&self, id: Uuid) -> Result<()> {
        let category = self
            .categories
            .find_by_id(id)
            .await?
            .ok_or_else(|| Error::not_found("Category", id))?;

        self.categories.delete(category.id).await?;
        debug!(category_id = %category.id, "category deleted");
        Ok(())
    }
}
