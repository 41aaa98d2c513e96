//! Outbound ports implemented by infrastructure collaborators

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Result;

/// Password hashing seam
pub trait PasswordHasher: Send + Sync {
    /// Hash a plain password into a storable string
    fn hash(&self, plain: &str) -> Result<String>;

    /// Check a plain password against a stored hash
    fn verify(&self, plain: &str, hash: &str) -> Result<bool>;
}

/// Claims embedded in an issued token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub user_id: Uuid,
    pub email: String,
    pub is_staff: bool,
    pub is_superuser: bool,
    /// Expiration as a unix timestamp
    pub exp: i64,
}

/// Token signing seam
pub trait TokenGenerator: Send + Sync {
    /// Produce a signed, opaque token carrying the claims
    fn generate(&self, claims: &TokenClaims) -> Result<String>;
}

/// Media storage seam for uploaded images
#[async_trait]
pub trait MediaStorage: Send + Sync {
    /// Store raw content at the given location
    async fn store(&self, location: &str, content: &[u8], content_type: &str) -> Result<()>;
}
