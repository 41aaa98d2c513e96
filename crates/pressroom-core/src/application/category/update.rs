//! Update category use case

use std::sync::Arc;

use serde::Deserialize;
use uuid::Uuid;

use crate::application::ensure_valid;
use crate::domain::category::CategoryRepository;
use crate::domain::repository::SearchableRepository;
use crate::error::{Error, Result};

use super::output::CategoryOutput;

/// Input for [`UpdateCategory`]; absent fields are left unchanged
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCategoryInput {
    pub id: Uuid,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

/// Apply a partial update to a category
pub struct UpdateCategory<R: CategoryRepository> {
    categories: Arc<R>,
}

impl<R: CategoryRepository> UpdateCategory<R> {
    pub fn new(categories: Arc<R>) -> Self {
        Self { categories }
    }

    pub async fn execute(&self, input: UpdateCategoryInput) -> Result<CategoryOutput> {
        let mut category = self
            .categories
            .find_by_id(input.id)
            .await?
            .ok_or_else(|| Error::not_found("Category", input.id))?;

        if let Some(name) = input.name {
            category.change_name(name);
        }
        if let Some(description) = input.description {
            category.change_description(Some(description));
        }
        match input.is_active {
            Some(true) => category.activate(),
            Some(false) => category.deactivate(),
            None => {}
        }

        ensure_valid(&category)?;
        self.categories.update(&category).await?;

        Ok(CategoryOutput::from_entity(&category))
    }
}
