//! List categories use case

use std::sync::Arc;

use crate::application::pagination::PaginationOutput;
use crate::domain::category::{CategoryRepository, CategorySearchParams};
use crate::domain::search::RawSearchQuery;
use crate::domain::repository::SearchableRepository;
use crate::error::Result;

use super::output::CategoryOutput;

/// Paginated, filtered, sorted category listing
pub struct ListCategories<R: CategoryRepository> {
    categories: Arc<R>,
}

impl<R: CategoryRepository> ListCategories<R> {
    pub fn new(categories: Arc<R>) -> Self {
        Self { categories }
    }

    pub async fn execute(&self, input: RawSearchQuery) -> Result<PaginationOutput<CategoryOutput>> {
        let params = CategorySearchParams::from_raw(&input);
        let result = self.categories.search(params).await?;

        let items = result.items.iter().map(CategoryOutput::from_entity).collect();
        Ok(PaginationOutput::from_search_result(items, &result))
    }
}
