//! Create category use case

use std::sync::Arc;

use serde::Deserialize;
use tracing::debug;

use crate::application::ensure_valid;
use crate::domain::category::{Category, CategoryRepository};
use crate::domain::repository::SearchableRepository;
use crate::error::{Error, Result};

use super::output::CategoryOutput;

/// Input for [`CreateCategory`]
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCategoryInput {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_is_active")]
    pub is_active: bool,
}

fn default_is_active() -> bool {
    true
}

/// Create a category after checking name uniqueness
pub struct CreateCategory<R: CategoryRepository> {
    categories: Arc<R>,
}

impl<R: CategoryRepository> CreateCategory<R> {
    pub fn new(categories: Arc<R>) -> Self {
        Self { categories }
    }

    pub async fn execute(&self, input: CreateCategoryInput) -> Result<CategoryOutput> {
        if self.categories.find_by_name(&input.name).await?.is_some() {
            return Err(Error::already_exists("Category", "name", input.name));
        }

        let category = Category::new(input.name, input.description, input.is_active);
        ensure_valid(&category)?;

        self.categories.insert(&category).await?;
        debug!(category_id = %category.id, "category created");

        Ok(CategoryOutput::from_entity(&category))
    }
}
