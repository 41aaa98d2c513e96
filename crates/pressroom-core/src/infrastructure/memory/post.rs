//! In-memory post repository

use std::cmp::Ordering;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::post::{Post, PostRepository, POST_SORTABLE_FIELDS};
use crate::domain::repository::SearchableRepository;
use crate::domain::search::{SearchParams, SearchResult};
use crate::error::Result;

use super::store::{InMemoryStore, SearchableEntity};

impl SearchableEntity for Post {
    type Filter = String;

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn sortable_fields() -> &'static [&'static str] {
        POST_SORTABLE_FIELDS
    }

    fn compare_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "title" => self.title.cmp(&other.title),
            "created_at" => self.created_at.cmp(&other.created_at),
            _ => Ordering::Equal,
        }
    }

    fn matches(&self, filter: &String) -> bool {
        self.title.to_lowercase().contains(&filter.to_lowercase())
    }
}

/// Reference in-memory implementation of [`PostRepository`]
pub struct InMemoryPostRepository {
    store: InMemoryStore<Post>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            store: InMemoryStore::new("Post"),
        }
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SearchableRepository for InMemoryPostRepository {
    type Entity = Post;
    type Filter = String;

    async fn insert(&self, entity: &Post) -> Result<()> {
        self.store.insert(entity)
    }

    async fn bulk_insert(&self, entities: &[Post]) -> Result<()> {
        self.store.bulk_insert(entities)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>> {
        self.store.find_by_id(id)
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Post>> {
        self.store.find_by_ids(ids)
    }

    async fn update(&self, entity: &Post) -> Result<()> {
        self.store.update(entity)
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        self.store.delete(id)
    }

    async fn search(&self, params: SearchParams<String>) -> Result<SearchResult<Post>> {
        self.store.search(params)
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_by_title(&self, title: &str) -> Result<Option<Post>> {
        self.store.find_first(|p| p.title == title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::search::SortDirection;
    use chrono::Duration;

    fn dated(title: &str, minutes_ago: i64) -> Post {
        let at = Utc::now() - Duration::minutes(minutes_ago);
        Post::restore(
            Uuid::new_v4(),
            Uuid::new_v4(),
            Uuid::new_v4(),
            title,
            "content",
            None,
            None,
            None,
            true,
            at,
            at,
        )
    }

    #[tokio::test]
    async fn title_filter_and_sort() {
        let repo = InMemoryPostRepository::new();
        repo.bulk_insert(&[
            dated("Rust at scale", 30),
            dated("Scaling sqlite", 20),
            dated("Cooking notes", 10),
        ])
        .await
        .unwrap();

        let params = SearchParams::new()
            .with_filter("scal".to_string())
            .with_sort("title", SortDirection::Desc);
        let result = repo.search(params).await.unwrap();

        assert_eq!(result.total, 2);
        let titles: Vec<&str> = result.items.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["Scaling sqlite", "Rust at scale"]);
    }

    #[tokio::test]
    async fn find_by_title_is_exact() {
        let repo = InMemoryPostRepository::new();
        repo.insert(&dated("Rust at scale", 1)).await.unwrap();
        assert!(repo.find_by_title("Rust at scale").await.unwrap().is_some());
        assert!(repo.find_by_title("rust at scale").await.unwrap().is_none());
    }
}
