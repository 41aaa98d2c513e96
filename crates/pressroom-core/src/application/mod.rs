//! Application layer - use cases and outbound ports
//!
//! One use case per operation; each orchestrates repositories and
//! entity validation and maps entities to flat output projections.

pub mod account;
pub mod category;
pub mod pagination;
pub mod ports;
pub mod post;

pub use pagination::PaginationOutput;

use crate::domain::Entity;
use crate::error::{Error, Result};

/// Surface a validation failure carrying the complete field-error map
///
/// Called by write use cases after construction or mutation, before any
/// persistence call.
pub(crate) fn ensure_valid<E: Entity>(entity: &E) -> Result<()> {
    let notification = entity.validate();
    if notification.has_errors() {
        return Err(Error::Validation(notification));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::category::Category;

    #[test]
    fn ensure_valid_passes_clean_entities() {
        let category = Category::new("Movies", None, true);
        assert!(ensure_valid(&category).is_ok());
    }

    #[test]
    fn ensure_valid_carries_the_full_error_map() {
        let category = Category::new("", Some("d".repeat(1025)), true);
        let err = ensure_valid(&category).unwrap_err();
        match err {
            Error::Validation(notification) => {
                assert_eq!(notification.errors().len(), 2);
            }
            other => panic!("expected validation error, got {other}"),
        }
    }
}
