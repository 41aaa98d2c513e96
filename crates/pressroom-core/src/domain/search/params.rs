//! Search parameter normalization
//!
//! Raw pagination/sort/filter input arrives from the web layer as
//! strings, numbers, booleans, absent values, or malformed mappings.
//! Normalization here is total: it never fails, it only narrows bad
//! input to safe, documented defaults so downstream code can assume
//! well-typed values unconditionally.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Default page size when the raw input is unusable
pub const DEFAULT_PER_PAGE: u32 = 15;

/// Sort direction for search operations
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Raw, untyped search input as supplied by a caller
///
/// Every field is an open dynamic value (string | number | boolean |
/// null | mapping); [`SearchParams::from_raw`] narrows them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSearchQuery {
    #[serde(default)]
    pub page: Option<Value>,
    #[serde(default)]
    pub per_page: Option<Value>,
    #[serde(default)]
    pub sort: Option<Value>,
    #[serde(default)]
    pub sort_dir: Option<Value>,
    #[serde(default)]
    pub filter: Option<Value>,
}

/// Normalization of a raw filter value into a typed filter
///
/// Implementations must be total: unusable input becomes `None`, never
/// an error.
pub trait FilterValue: Sized {
    fn from_raw(raw: Option<&Value>) -> Option<Self>;
}

/// Strings pass through unchanged, including the empty string, which
/// stays a distinct "filter by empty value". Every other shape of input
/// normalizes to no filter.
impl FilterValue for String {
    fn from_raw(raw: Option<&Value>) -> Option<Self> {
        match raw {
            Some(Value::String(s)) => Some(s.clone()),
            _ => None,
        }
    }
}

/// Normalized page/per_page/sort/sort_dir/filter bundle
///
/// Invariant: `page >= 1` and `per_page >= 1` always hold after
/// construction, regardless of input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchParams<F> {
    pub page: u32,
    pub per_page: u32,
    pub sort: Option<String>,
    pub sort_dir: SortDirection,
    pub filter: Option<F>,
}

impl<F> Default for SearchParams<F> {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PER_PAGE,
            sort: None,
            sort_dir: SortDirection::Asc,
            filter: None,
        }
    }
}

impl<F> SearchParams<F> {
    /// Create params with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page number (values below 1 are narrowed to 1)
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    /// Set the page size (values below 1 are narrowed to 1)
    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page.max(1);
        self
    }

    /// Set the sort field and direction
    pub fn with_sort(mut self, sort: impl Into<String>, sort_dir: SortDirection) -> Self {
        self.sort = Some(sort.into());
        self.sort_dir = sort_dir;
        self
    }

    /// Set the filter
    pub fn with_filter(mut self, filter: F) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Zero-based offset of the first item on the requested page
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.per_page)
    }
}

impl<F: FilterValue> SearchParams<F> {
    /// Normalize raw caller input into typed params
    ///
    /// Total: every input shape maps to a value, never an error.
    pub fn from_raw(raw: &RawSearchQuery) -> Self {
        Self {
            page: normalize_page(raw.page.as_ref()),
            per_page: normalize_per_page(raw.per_page.as_ref()),
            sort: normalize_sort(raw.sort.as_ref()),
            sort_dir: normalize_sort_dir(raw.sort_dir.as_ref()),
            filter: F::from_raw(raw.filter.as_ref()),
        }
    }
}

/// Normalize a raw page value; defaults to 1
pub fn normalize_page(raw: Option<&Value>) -> u32 {
    normalize_positive_int(raw, 1)
}

/// Normalize a raw page size value; defaults to [`DEFAULT_PER_PAGE`]
pub fn normalize_per_page(raw: Option<&Value>) -> u32 {
    normalize_positive_int(raw, DEFAULT_PER_PAGE)
}

fn normalize_positive_int(raw: Option<&Value>, default: u32) -> u32 {
    let coerced = match raw {
        None | Some(Value::Null) => None,
        // true is numerically 1; false coerces to 0, which fails the
        // floor check below
        Some(Value::Bool(b)) => {
            if *b {
                Some(1)
            } else {
                None
            }
        }
        Some(Value::Number(n)) => number_floor(n),
        Some(Value::String(s)) => parse_numeric(s),
        Some(Value::Array(_)) | Some(Value::Object(_)) => None,
    };

    match coerced {
        Some(v) if v >= 1 => v.min(i64::from(u32::MAX)) as u32,
        _ => default,
    }
}

fn number_floor(n: &serde_json::Number) -> Option<i64> {
    if let Some(i) = n.as_i64() {
        Some(i)
    } else if n.as_u64().is_some() {
        // only reachable for values above i64::MAX; certainly positive
        Some(i64::MAX)
    } else {
        n.as_f64().map(|f| f.trunc() as i64)
    }
}

fn parse_numeric(s: &str) -> Option<i64> {
    let trimmed = s.trim();
    trimmed
        .parse::<i64>()
        .ok()
        .or_else(|| trimmed.parse::<f64>().ok().map(|f| f.trunc() as i64))
}

/// Normalize a raw sort field
///
/// Absent, null, and empty-string input mean "no sort"; any other value
/// is stringified using its canonical textual form.
pub fn normalize_sort(raw: Option<&Value>) -> Option<String> {
    match raw {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => {
            if s.is_empty() {
                None
            } else {
                Some(s.clone())
            }
        }
        Some(v) => Some(v.to_string()),
    }
}

/// Normalize a raw sort direction
///
/// Descending if and only if the lowercase-trimmed input is the string
/// `"desc"`; everything else (including absent, malformed, numeric, or
/// mapping input) is ascending.
pub fn normalize_sort_dir(raw: Option<&Value>) -> SortDirection {
    match raw {
        Some(Value::String(s)) if s.trim().eq_ignore_ascii_case("desc") => SortDirection::Desc,
        _ => SortDirection::Asc,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn default_params() {
        let params: SearchParams<String> = SearchParams::new();
        assert_eq!(params.page, 1);
        assert_eq!(params.per_page, 15);
        assert_eq!(params.sort, None);
        assert_eq!(params.sort_dir, SortDirection::Asc);
        assert_eq!(params.filter, None);
    }

    #[test]
    fn page_normalization_table() {
        let cases: Vec<(Option<Value>, u32)> = vec![
            (None, 1),
            (Some(Value::Null), 1),
            (Some(json!("")), 1),
            (Some(json!("fake")), 1),
            (Some(json!(0)), 1),
            (Some(json!(-1)), 1),
            (Some(json!("0")), 1),
            (Some(json!("-1")), 1),
            (Some(json!(5.5)), 5),
            (Some(json!("5.5")), 5),
            (Some(json!(true)), 1),
            (Some(json!(false)), 1),
            (Some(json!({})), 1),
            (Some(json!([])), 1),
        ];
        for (raw, expected) in cases {
            assert_eq!(normalize_page(raw.as_ref()), expected, "input {:?}", raw);
        }
        assert_eq!(normalize_page(Some(&json!(1))), 1);
        assert_eq!(normalize_page(Some(&json!(2))), 2);
        assert_eq!(normalize_page(Some(&json!("7"))), 7);
    }

    #[test]
    fn per_page_normalization_table() {
        let cases: Vec<(Option<Value>, u32)> = vec![
            (None, 15),
            (Some(Value::Null), 15),
            (Some(json!("")), 15),
            (Some(json!("fake")), 15),
            (Some(json!(0)), 15),
            (Some(json!(-1)), 15),
            (Some(json!("0")), 15),
            (Some(json!("-1")), 15),
            (Some(json!(5.5)), 5),
            (Some(json!(true)), 1),
            (Some(json!(false)), 15),
            (Some(json!({})), 15),
        ];
        for (raw, expected) in cases {
            assert_eq!(normalize_per_page(raw.as_ref()), expected, "input {:?}", raw);
        }
        assert_eq!(normalize_per_page(Some(&json!(1))), 1);
        assert_eq!(normalize_per_page(Some(&json!(2))), 2);
    }

    #[test]
    fn sort_normalization_table() {
        assert_eq!(normalize_sort(None), None);
        assert_eq!(normalize_sort(Some(&Value::Null)), None);
        assert_eq!(normalize_sort(Some(&json!(""))), None);
        assert_eq!(normalize_sort(Some(&json!("fake"))), Some("fake".into()));
        assert_eq!(normalize_sort(Some(&json!(0))), Some("0".into()));
        assert_eq!(normalize_sort(Some(&json!(-1))), Some("-1".into()));
        assert_eq!(normalize_sort(Some(&json!("0"))), Some("0".into()));
        assert_eq!(normalize_sort(Some(&json!(5.5))), Some("5.5".into()));
        assert_eq!(normalize_sort(Some(&json!(true))), Some("true".into()));
        assert_eq!(normalize_sort(Some(&json!(false))), Some("false".into()));
        assert_eq!(normalize_sort(Some(&json!({}))), Some("{}".into()));
    }

    #[test]
    fn sort_dir_normalization_table() {
        assert_eq!(normalize_sort_dir(None), SortDirection::Asc);
        assert_eq!(normalize_sort_dir(Some(&json!(""))), SortDirection::Asc);
        assert_eq!(normalize_sort_dir(Some(&json!("fake"))), SortDirection::Asc);
        assert_eq!(normalize_sort_dir(Some(&json!(0))), SortDirection::Asc);
        assert_eq!(normalize_sort_dir(Some(&json!({}))), SortDirection::Asc);
        assert_eq!(normalize_sort_dir(Some(&json!("asc"))), SortDirection::Asc);
        assert_eq!(normalize_sort_dir(Some(&json!("ASC"))), SortDirection::Asc);
        assert_eq!(normalize_sort_dir(Some(&json!("desc"))), SortDirection::Desc);
        assert_eq!(normalize_sort_dir(Some(&json!("DESC"))), SortDirection::Desc);
        assert_eq!(
            normalize_sort_dir(Some(&json!("  desc  "))),
            SortDirection::Desc
        );
    }

    #[test]
    fn string_filter_normalization_table() {
        assert_eq!(String::from_raw(None), None);
        assert_eq!(String::from_raw(Some(&Value::Null)), None);
        assert_eq!(String::from_raw(Some(&json!(""))), Some("".into()));
        assert_eq!(String::from_raw(Some(&json!("fake"))), Some("fake".into()));
        assert_eq!(String::from_raw(Some(&json!("0"))), Some("0".into()));
        assert_eq!(String::from_raw(Some(&json!(0))), None);
        assert_eq!(String::from_raw(Some(&json!(-1))), None);
        assert_eq!(String::from_raw(Some(&json!(5.5))), None);
        assert_eq!(String::from_raw(Some(&json!(true))), None);
        assert_eq!(String::from_raw(Some(&json!(false))), None);
        assert_eq!(String::from_raw(Some(&json!({}))), None);
    }

    #[test]
    fn from_raw_combines_all_fields() {
        let raw = RawSearchQuery {
            page: Some(json!("2")),
            per_page: Some(json!(30)),
            sort: Some(json!("name")),
            sort_dir: Some(json!("DESC")),
            filter: Some(json!("movie")),
        };
        let params = SearchParams::<String>::from_raw(&raw);
        assert_eq!(params.page, 2);
        assert_eq!(params.per_page, 30);
        assert_eq!(params.sort.as_deref(), Some("name"));
        assert_eq!(params.sort_dir, SortDirection::Desc);
        assert_eq!(params.filter.as_deref(), Some("movie"));
    }

    #[test]
    fn from_raw_degrades_malformed_input_to_defaults() {
        let raw = RawSearchQuery {
            page: Some(json!({})),
            per_page: Some(json!("bogus")),
            sort: Some(json!("")),
            sort_dir: Some(json!(42)),
            filter: Some(json!(true)),
        };
        let params = SearchParams::<String>::from_raw(&raw);
        assert_eq!(params.page, 1);
        assert_eq!(params.per_page, 15);
        assert_eq!(params.sort, None);
        assert_eq!(params.sort_dir, SortDirection::Asc);
        assert_eq!(params.filter, None);
    }

    #[test]
    fn offset_is_zero_based() {
        let params: SearchParams<String> = SearchParams::new().with_page(3).with_per_page(10);
        assert_eq!(params.offset(), 20);
    }

    #[test]
    fn page_far_beyond_u32_saturates() {
        assert_eq!(normalize_page(Some(&json!(i64::MAX))), u32::MAX);
        assert_eq!(normalize_page(Some(&json!(u64::MAX))), u32::MAX);
    }

    #[test]
    fn raw_query_deserializes_from_loose_json() {
        let raw: RawSearchQuery =
            serde_json::from_value(json!({"page": "3", "sort": "name", "extra": "ignored"}))
                .expect("raw query must accept loose input");
        let params = SearchParams::<String>::from_raw(&raw);
        assert_eq!(params.page, 3);
        assert_eq!(params.sort.as_deref(), Some("name"));
        assert_eq!(params.per_page, 15);
    }
}
