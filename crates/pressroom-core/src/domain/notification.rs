//! Validation error accumulator
//!
//! Collects per-field validation errors without stopping at the first
//! failure, so a caller can report every problem in one response.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Accumulator of field-keyed validation error messages
///
/// Field keys are held in a sorted map for deterministic iteration;
/// messages for the same field keep their insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    errors: BTreeMap<String, Vec<String>>,
}

impl Notification {
    /// Create an empty notification
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an error message under the given field
    ///
    /// Adding a second message for the same field appends rather than
    /// overwrites; nothing is ever dropped.
    pub fn add_error(&mut self, message: impl Into<String>, field: impl Into<String>) {
        self.errors
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    /// Whether any field has at least one error
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// The full field-to-messages mapping
    pub fn errors(&self) -> &BTreeMap<String, Vec<String>> {
        &self.errors
    }

    /// Consume the notification, returning the mapping
    pub fn into_errors(self) -> BTreeMap<String, Vec<String>> {
        self.errors
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.errors {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", field, messages.join(", "))?;
            first = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_notification_has_no_errors() {
        let notification = Notification::new();
        assert!(!notification.has_errors());
        assert!(notification.errors().is_empty());
    }

    #[test]
    fn add_error_creates_field_entry() {
        let mut notification = Notification::new();
        notification.add_error("must not be empty", "name");

        assert!(notification.has_errors());
        assert_eq!(
            notification.errors().get("name"),
            Some(&vec!["must not be empty".to_string()])
        );
    }

    #[test]
    fn second_error_for_same_field_appends_in_order() {
        let mut notification = Notification::new();
        notification.add_error("must not be empty", "name");
        notification.add_error("must be 255 characters or less", "name");

        assert_eq!(
            notification.errors().get("name"),
            Some(&vec![
                "must not be empty".to_string(),
                "must be 255 characters or less".to_string(),
            ])
        );
    }

    #[test]
    fn display_lists_every_field() {
        let mut notification = Notification::new();
        notification.add_error("must contain '@'", "email");
        notification.add_error("must not be empty", "name");

        let rendered = notification.to_string();
        assert!(rendered.contains("email: must contain '@'"));
        assert!(rendered.contains("name: must not be empty"));
    }
}
