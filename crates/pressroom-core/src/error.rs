//! Error types for Pressroom

use thiserror::Error;
use uuid::Uuid;

use crate::domain::Notification;

/// Result type alias using Pressroom's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Pressroom error types
///
/// The first four variants are the application-level failure kinds that
/// use cases surface to callers; the rest wrap collaborator failures.
#[derive(Error, Debug)]
pub enum Error {
    /// An id-keyed lookup required for an operation found no row
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: Uuid },

    /// A uniqueness-constrained field collided with an existing row
    #[error("{entity} with {field} '{value}' already exists")]
    AlreadyExists {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    /// Entity validation produced one or more field errors
    ///
    /// Carries the complete field-to-messages mapping so callers can
    /// report every problem at once.
    #[error("entity validation failed: {0}")]
    Validation(Notification),

    /// Supplied and stored credentials do not match
    ///
    /// Deliberately undifferentiated from "unknown user".
    #[error("invalid email or password")]
    InvalidCredentials,

    /// Database error from a store-backed repository
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Hashing or token signing failure
    #[error("cryptography error: {0}")]
    Crypto(String),

    /// Media storage failure
    #[error("storage error: {0}")]
    Storage(String),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a not found error
    pub fn not_found(entity: &'static str, id: Uuid) -> Self {
        Self::NotFound { entity, id }
    }

    /// Create an already exists error
    pub fn already_exists(
        entity: &'static str,
        field: &'static str,
        value: impl Into<String>,
    ) -> Self {
        Self::AlreadyExists {
            entity,
            field,
            value: value.into(),
        }
    }
}
