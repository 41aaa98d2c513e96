//! In-memory category repository

use std::cmp::Ordering;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::category::{Category, CategoryRepository, CATEGORY_SORTABLE_FIELDS};
use crate::domain::repository::SearchableRepository;
use crate::domain::search::{SearchParams, SearchResult};
use crate::error::Result;

use super::store::{InMemoryStore, SearchableEntity};

impl SearchableEntity for Category {
    type Filter = String;

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn sortable_fields() -> &'static [&'static str] {
        CATEGORY_SORTABLE_FIELDS
    }

    fn compare_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "name" => self.name.cmp(&other.name),
            "created_at" => self.created_at.cmp(&other.created_at),
            _ => Ordering::Equal,
        }
    }

    fn matches(&self, filter: &String) -> bool {
        self.name.to_lowercase().contains(&filter.to_lowercase())
    }
}

/// Reference in-memory implementation of [`CategoryRepository`]
pub struct InMemoryCategoryRepository {
    store: InMemoryStore<Category>,
}

impl InMemoryCategoryRepository {
    pub fn new() -> Self {
        Self {
            store: InMemoryStore::new("Category"),
        }
    }
}

impl Default for InMemoryCategoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SearchableRepository for InMemoryCategoryRepository {
    type Entity = Category;
    type Filter = String;

    async fn insert(&self, entity: &Category) -> Result<()> {
        self.store.insert(entity)
    }

    async fn bulk_insert(&self, entities: &[Category]) -> Result<()> {
        self.store.bulk_insert(entities)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>> {
        self.store.find_by_id(id)
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Category>> {
        self.store.find_by_ids(ids)
    }

    async fn update(&self, entity: &Category) -> Result<()> {
        self.store.update(entity)
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        self.store.delete(id)
    }

    async fn search(&self, params: SearchParams<String>) -> Result<SearchResult<Category>> {
        self.store.search(params)
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn find_by_name(&self, name: &str) -> Result<Option<Category>> {
        self.store.find_first(|c| c.name == name)
    }
}
