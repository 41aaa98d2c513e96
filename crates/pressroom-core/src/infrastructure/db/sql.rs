//! Small SQL building helpers shared by the SQLite repositories

use uuid::Uuid;

use crate::domain::search::{SearchParams, SortDirection};
use crate::error::{Error, Result};

/// Build a `%...%` LIKE pattern from a filter term, escaping LIKE
/// metacharacters so the term matches literally
pub fn like_pattern(term: &str) -> String {
    let escaped = term
        .to_lowercase()
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

/// Resolve the ORDER BY clause for a search
///
/// Only allow-listed field names ever reach the SQL text; anything else
/// falls back to creation-time descending, mirroring the in-memory
/// reference.
pub fn order_by_clause<F>(params: &SearchParams<F>, sortable_fields: &[&str]) -> String {
    match params.sort.as_deref().filter(|s| sortable_fields.contains(s)) {
        Some(field) => {
            let direction = match params.sort_dir {
                SortDirection::Asc => "ASC",
                SortDirection::Desc => "DESC",
            };
            format!("{field} {direction}")
        }
        None => "created_at DESC".to_string(),
    }
}

/// Parse a stored uuid column, labelling the offending column on failure
pub fn parse_uuid(value: &str, column: &str) -> Result<Uuid> {
    Uuid::parse_str(value).map_err(|e| Error::Other(format!("invalid uuid in {column}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_pattern_escapes_metacharacters() {
        assert_eq!(like_pattern("a%b_c"), "%a\\%b\\_c%");
        assert_eq!(like_pattern("Movies"), "%movies%");
    }

    #[test]
    fn order_by_uses_allow_listed_field() {
        let params: SearchParams<String> =
            SearchParams::new().with_sort("name", SortDirection::Desc);
        assert_eq!(order_by_clause(&params, &["name", "created_at"]), "name DESC");
    }

    #[test]
    fn order_by_falls_back_on_unknown_field() {
        let params: SearchParams<String> =
            SearchParams::new().with_sort("evil; DROP TABLE", SortDirection::Asc);
        assert_eq!(
            order_by_clause(&params, &["name", "created_at"]),
            "created_at DESC"
        );
    }

    #[test]
    fn parse_uuid_labels_the_column() {
        let err = parse_uuid("nope", "users.id").unwrap_err();
        assert!(err.to_string().contains("users.id"));
    }
}
