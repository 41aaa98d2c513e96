//! In-memory user and token repositories

use std::cmp::Ordering;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::account::{
    User, UserFilter, UserRepository, UserToken, UserTokenRepository, USER_SORTABLE_FIELDS,
};
use crate::domain::repository::SearchableRepository;
use crate::domain::search::{SearchParams, SearchResult};
use crate::error::{Error, Result};

use super::store::{InMemoryStore, SearchableEntity};

impl SearchableEntity for User {
    type Filter = UserFilter;

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn sortable_fields() -> &'static [&'static str] {
        USER_SORTABLE_FIELDS
    }

    fn compare_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "name" => self.name.cmp(&other.name),
            "created_at" => self.created_at.cmp(&other.created_at),
            _ => Ordering::Equal,
        }
    }

    fn matches(&self, filter: &UserFilter) -> bool {
        filter.matches(self)
    }
}

/// Reference in-memory implementation of [`UserRepository`]
pub struct InMemoryUserRepository {
    store: InMemoryStore<User>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            store: InMemoryStore::new("User"),
        }
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SearchableRepository for InMemoryUserRepository {
    type Entity = User;
    type Filter = UserFilter;

    async fn insert(&self, entity: &User) -> Result<()> {
        self.store.insert(entity)
    }

    async fn bulk_insert(&self, entities: &[User]) -> Result<()> {
        self.store.bulk_insert(entities)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        self.store.find_by_id(id)
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<User>> {
        self.store.find_by_ids(ids)
    }

    async fn update(&self, entity: &User) -> Result<()> {
        self.store.update(entity)
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        self.store.delete(id)
    }

    async fn search(&self, params: SearchParams<UserFilter>) -> Result<SearchResult<User>> {
        self.store.search(params)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        self.store.find_first(|u| u.email == email)
    }
}

/// Reference in-memory implementation of [`UserTokenRepository`]
pub struct InMemoryUserTokenRepository {
    tokens: RwLock<Vec<UserToken>>,
}

impl InMemoryUserTokenRepository {
    pub fn new() -> Self {
        Self {
            tokens: RwLock::new(Vec::new()),
        }
    }
}

impl Default for InMemoryUserTokenRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserTokenRepository for InMemoryUserTokenRepository {
    async fn insert(&self, token: &UserToken) -> Result<()> {
        self.tokens
            .write()
            .map_err(|_| Error::Other("repository lock poisoned".into()))?
            .push(token.clone());
        Ok(())
    }

    async fn find_by_refresh_token(&self, refresh_token: &str) -> Result<Option<UserToken>> {
        Ok(self
            .tokens
            .read()
            .map_err(|_| Error::Other("repository lock poisoned".into()))?
            .iter()
            .find(|t| t.refresh_token == refresh_token)
            .cloned())
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        self.tokens
            .write()
            .map_err(|_| Error::Other("repository lock poisoned".into()))?
            .retain(|t| t.id != id);
        Ok(())
    }
}
