//! Generic in-memory searchable store
//!
//! Reference implementation of the search contract. Per-aggregate
//! repositories delegate CRUD and search here and add their
//! unique-field lookups.

use std::cmp::Ordering;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entity::{AggregateRoot, Entity};
use crate::domain::search::{SearchParams, SearchResult, SortDirection};
use crate::error::{Error, Result};

/// Capabilities an aggregate needs to live in an [`InMemoryStore`]
pub trait SearchableEntity: AggregateRoot + Clone + Send + Sync {
    type Filter: Clone + Send + Sync;

    /// Creation timestamp used for the default sort
    fn created_at(&self) -> DateTime<Utc>;

    /// Allow-list of sortable field names
    fn sortable_fields() -> &'static [&'static str];

    /// Compare two entities on an allow-listed field
    fn compare_field(&self, other: &Self, field: &str) -> Ordering;

    /// Evaluate the entity against a filter
    fn matches(&self, filter: &Self::Filter) -> bool;
}

/// Lock-guarded vector of entities implementing the search algorithm
pub struct InMemoryStore<E: SearchableEntity> {
    entity_name: &'static str,
    items: RwLock<Vec<E>>,
}

impl<E: SearchableEntity> InMemoryStore<E> {
    /// Create an empty store; `entity_name` labels NotFound errors
    pub fn new(entity_name: &'static str) -> Self {
        Self {
            entity_name,
            items: RwLock::new(Vec::new()),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<E>>> {
        self.items
            .read()
            .map_err(|_| Error::Other("repository lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<E>>> {
        self.items
            .write()
            .map_err(|_| Error::Other("repository lock poisoned".into()))
    }

    pub fn insert(&self, entity: &E) -> Result<()> {
        self.write()?.push(entity.clone());
        Ok(())
    }

    pub fn bulk_insert(&self, entities: &[E]) -> Result<()> {
        self.write()?.extend_from_slice(entities);
        Ok(())
    }

    pub fn find_by_id(&self, id: Uuid) -> Result<Option<E>> {
        Ok(self.read()?.iter().find(|e| e.entity_id() == id).cloned())
    }

    pub fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<E>> {
        Ok(self
            .read()?
            .iter()
            .filter(|e| ids.contains(&e.entity_id()))
            .cloned()
            .collect())
    }

    /// First entity matching a predicate, in insertion order
    pub fn find_first<P>(&self, predicate: P) -> Result<Option<E>>
    where
        P: Fn(&E) -> bool,
    {
        Ok(self.read()?.iter().find(|e| predicate(e)).cloned())
    }

    pub fn update(&self, entity: &E) -> Result<()> {
        let mut items = self.write()?;
        match items.iter_mut().find(|e| e.entity_id() == entity.entity_id()) {
            Some(slot) => {
                *slot = entity.clone();
                Ok(())
            }
            None => Err(Error::not_found(self.entity_name, entity.entity_id())),
        }
    }

    /// Remove by id; removing a nonexistent id is a no-op
    pub fn delete(&self, id: Uuid) -> Result<()> {
        self.write()?.retain(|e| e.entity_id() != id);
        Ok(())
    }

    /// Filter, sort, and paginate the full candidate set
    pub fn search(&self, params: SearchParams<E::Filter>) -> Result<SearchResult<E>> {
        let items = self.read()?;
        let mut matched: Vec<E> = match &params.filter {
            Some(filter) => items.iter().filter(|e| e.matches(filter)).cloned().collect(),
            None => items.iter().cloned().collect(),
        };
        drop(items);

        // sorts are stable: ties keep their original relative order
        match params.sort.as_deref().filter(|s| E::sortable_fields().contains(s)) {
            Some(field) => match params.sort_dir {
                SortDirection::Asc => matched.sort_by(|a, b| a.compare_field(b, field)),
                SortDirection::Desc => matched.sort_by(|a, b| b.compare_field(a, field)),
            },
            // unknown sort fields are ignored silently
            None => matched.sort_by(|a, b| b.created_at().cmp(&a.created_at())),
        }

        let total = matched.len() as u64;
        let start = params.offset() as usize;
        let page_items: Vec<E> = if start < matched.len() {
            matched
                .into_iter()
                .skip(start)
                .take(params.per_page as usize)
                .collect()
        } else {
            Vec::new()
        };

        Ok(SearchResult::new(
            page_items,
            total,
            params.page,
            params.per_page,
        ))
    }
}
