//! Presentation-ready pagination output

use serde::Serialize;

use crate::domain::search::SearchResult;

/// A page of output projections plus paging metadata
///
/// `last_page` is derived from the search result, never set directly:
/// `max(1, ceil(total / per_page))`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaginationOutput<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub current_page: u32,
    pub per_page: u32,
    pub last_page: u64,
}

impl<T> PaginationOutput<T> {
    /// Map a search result into a presentation page
    ///
    /// `items` are the already-projected entities of `result.items`.
    pub fn from_search_result<E>(items: Vec<T>, result: &SearchResult<E>) -> Self {
        let per_page = u64::from(result.per_page.max(1));
        let last_page = result.total.div_ceil(per_page).max(1);

        Self {
            items,
            total: result.total,
            current_page: result.current_page,
            per_page: result.per_page,
            last_page,
        }
    }
}
