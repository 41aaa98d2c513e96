//! Searchable repository contract
//!
//! The trait abstracts over different storage backends (in-memory,
//! SQLite, etc.); every concrete repository implements the identical
//! search contract.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;

use super::entity::AggregateRoot;
use super::search::{SearchParams, SearchResult};

/// Generic repository contract for searchable aggregates
///
/// Contract notes:
/// - `find_by_id` returning `None` is not an error.
/// - `find_by_ids` silently omits missing ids.
/// - `update` fails with `Error::NotFound` when no row has the id.
/// - `delete` of a nonexistent id is a silent no-op.
/// - `search` never fails for pagination/sort/filter reasons; bad input
///   was already narrowed by [`SearchParams`].
#[async_trait]
pub trait SearchableRepository: Send + Sync {
    type Entity: AggregateRoot + Send + Sync;
    type Filter: Send + Sync;

    /// Persist a new entity
    async fn insert(&self, entity: &Self::Entity) -> Result<()>;

    /// Persist many entities in one logical operation
    ///
    /// Persistence order is not guaranteed to match input order.
    async fn bulk_insert(&self, entities: &[Self::Entity]) -> Result<()>;

    /// Point lookup by id
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Self::Entity>>;

    /// Lookup of many ids; missing ids are omitted from the result
    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Self::Entity>>;

    /// Full-field overwrite by id
    async fn update(&self, entity: &Self::Entity) -> Result<()>;

    /// Remove by id
    async fn delete(&self, id: Uuid) -> Result<()>;

    /// Filtered, sorted, paginated listing
    async fn search(&self, params: SearchParams<Self::Filter>)
        -> Result<SearchResult<Self::Entity>>;
}
