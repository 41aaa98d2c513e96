//! Typed search result page

use serde::Serialize;

/// A page of entities plus total-count and paging echo
///
/// `total` counts every row matching the filter, not just the page.
/// Invariant: `items.len() <= per_page as usize`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult<E> {
    pub items: Vec<E>,
    pub total: u64,
    pub current_page: u32,
    pub per_page: u32,
}

impl<E> SearchResult<E> {
    /// Create a new search result
    pub fn new(items: Vec<E>, total: u64, current_page: u32, per_page: u32) -> Self {
        Self {
            items,
            total,
            current_page,
            per_page,
        }
    }
}
