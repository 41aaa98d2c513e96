//! User repository contracts and filter

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::domain::repository::SearchableRepository;
use crate::domain::search::{FilterValue, SearchParams, SearchResult};
use crate::error::Result;

use super::token::UserToken;
use super::user::User;

/// Fields a user listing may sort by
pub const USER_SORTABLE_FIELDS: &[&str] = &["name", "created_at"];

/// Structured user filter
///
/// Every set field narrows the result; fields combine with logical AND.
/// A filter with no set fields passes every user through unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserFilter {
    pub name: Option<String>,
    pub email: Option<String>,
    pub is_staff: Option<bool>,
    pub is_superuser: Option<bool>,
    pub is_active: Option<bool>,
}

impl UserFilter {
    /// Whether no criterion is set
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.is_staff.is_none()
            && self.is_superuser.is_none()
            && self.is_active.is_none()
    }

    /// Evaluate the filter against a user
    ///
    /// Text criteria are case-insensitive substring matches; flag
    /// criteria are exact.
    pub fn matches(&self, user: &User) -> bool {
        if let Some(name) = &self.name {
            if !user.name.to_lowercase().contains(&name.to_lowercase()) {
                return false;
            }
        }
        if let Some(email) = &self.email {
            if !user.email.to_lowercase().contains(&email.to_lowercase()) {
                return false;
            }
        }
        if let Some(is_staff) = self.is_staff {
            if user.is_staff != is_staff {
                return false;
            }
        }
        if let Some(is_superuser) = self.is_superuser {
            if user.is_superuser != is_superuser {
                return false;
            }
        }
        if let Some(is_active) = self.is_active {
            if user.is_active != is_active {
                return false;
            }
        }
        true
    }
}

/// Only a mapping is usable as a user filter; recognized keys are read
/// tolerantly and wrongly-typed keys are ignored.
impl FilterValue for UserFilter {
    fn from_raw(raw: Option<&Value>) -> Option<Self> {
        let map = match raw {
            Some(Value::Object(map)) => map,
            _ => return None,
        };

        let mut filter = UserFilter::default();
        if let Some(Value::String(name)) = map.get("name") {
            filter.name = Some(name.clone());
        }
        if let Some(Value::String(email)) = map.get("email") {
            filter.email = Some(email.clone());
        }
        if let Some(Value::Bool(is_staff)) = map.get("is_staff") {
            filter.is_staff = Some(*is_staff);
        }
        if let Some(Value::Bool(is_superuser)) = map.get("is_superuser") {
            filter.is_superuser = Some(*is_superuser);
        }
        if let Some(Value::Bool(is_active)) = map.get("is_active") {
            filter.is_active = Some(*is_active);
        }
        Some(filter)
    }
}

/// Search params for users
pub type UserSearchParams = SearchParams<UserFilter>;

/// Search result page of users
pub type UserSearchResult = SearchResult<User>;

/// Repository contract for users
#[async_trait]
pub trait UserRepository: SearchableRepository<Entity = User, Filter = UserFilter> {
    /// Exact-email lookup used for uniqueness checks and authentication
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;
}

/// Repository contract for refresh tokens
///
/// Tokens are append-and-lookup rows, not a searchable aggregate.
#[async_trait]
pub trait UserTokenRepository: Send + Sync {
    /// Persist a new token
    async fn insert(&self, token: &UserToken) -> Result<()>;

    /// Lookup by the opaque token string
    async fn find_by_refresh_token(&self, refresh_token: &str) -> Result<Option<UserToken>>;

    /// Remove by id; missing ids are a no-op
    async fn delete(&self, id: Uuid) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn user(name: &str, email: &str, is_staff: bool) -> User {
        User::new(name, email, "$argon2id$stub").with_staff(is_staff)
    }

    #[test]
    fn empty_filter_matches_everything() {
        let filter = UserFilter::default();
        assert!(filter.is_empty());
        assert!(filter.matches(&user("Ada", "ada@example.com", false)));
        assert!(filter.matches(&user("Grace", "grace@example.com", true)));
    }

    #[test]
    fn name_and_email_combine_with_and() {
        let filter = UserFilter {
            name: Some("ada".into()),
            email: Some("example.com".into()),
            ..Default::default()
        };
        assert!(filter.matches(&user("Ada Lovelace", "ada@example.com", false)));
        assert!(!filter.matches(&user("Grace Hopper", "ada@example.com", false)));
        assert!(!filter.matches(&user("Ada Lovelace", "ada@elsewhere.org", false)));
    }

    #[test]
    fn flag_criteria_are_exact() {
        let filter = UserFilter {
            is_staff: Some(true),
            ..Default::default()
        };
        assert!(filter.matches(&user("Ada", "ada@example.com", true)));
        assert!(!filter.matches(&user("Ada", "ada@example.com", false)));
    }

    #[test]
    fn text_match_is_case_insensitive() {
        let filter = UserFilter {
            name: Some("ADA".into()),
            ..Default::default()
        };
        assert!(filter.matches(&user("ada lovelace", "ada@example.com", false)));
    }

    #[test]
    fn from_raw_reads_recognized_keys_only() {
        let raw = json!({"name": "ada", "is_staff": true, "unknown": 1, "email": 42});
        let filter = UserFilter::from_raw(Some(&raw)).expect("mapping input is usable");
        assert_eq!(filter.name.as_deref(), Some("ada"));
        assert_eq!(filter.is_staff, Some(true));
        // wrongly-typed email is ignored, not an error
        assert_eq!(filter.email, None);
    }

    #[test]
    fn from_raw_rejects_non_mapping_input() {
        assert_eq!(UserFilter::from_raw(Some(&json!("ada"))), None);
        assert_eq!(UserFilter::from_raw(Some(&json!(7))), None);
        assert_eq!(UserFilter::from_raw(None), None);
    }

    #[test]
    fn from_raw_empty_mapping_recognizes_zero_criteria() {
        let filter = UserFilter::from_raw(Some(&json!({}))).expect("empty mapping is usable");
        assert!(filter.is_empty());
    }
}
