//! Search contracts shared by every searchable repository

pub mod params;
pub mod result;

pub use params::{
    normalize_page, normalize_per_page, normalize_sort, normalize_sort_dir, FilterValue,
    RawSearchQuery, SearchParams, SortDirection, DEFAULT_PER_PAGE,
};
pub use result::SearchResult;
