//! Local filesystem media storage

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use crate::application::ports::MediaStorage;
use crate::error::{Error, Result};

/// Filesystem implementation of the media storage port
///
/// Stores uploaded content under a root directory, mirroring the
/// storage-relative location used in post image references.
pub struct LocalMediaStorage {
    root: PathBuf,
}

impl LocalMediaStorage {
    /// Create a storage rooted at the given directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve a storage location to a path under the root
    ///
    /// Rejects absolute locations and parent-directory components so a
    /// location can never escape the root.
    fn resolve(&self, location: &str) -> Result<PathBuf> {
        let relative = Path::new(location);
        let escapes = relative.components().any(|c| {
            matches!(
                c,
                Component::ParentDir | Component::RootDir | Component::Prefix(_)
            )
        });
        if escapes || location.is_empty() {
            return Err(Error::Storage(format!("invalid location '{location}'")));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl MediaStorage for LocalMediaStorage {
    async fn store(&self, location: &str, content: &[u8], content_type: &str) -> Result<()> {
        let path = self.resolve(location)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| Error::Storage(format!("failed to create {}: {e}", parent.display())))?;
        }
        tokio::fs::write(&path, content)
            .await
            .map_err(|e| Error::Storage(format!("failed to write {}: {e}", path.display())))?;
        debug!(location, content_type, bytes = content.len(), "media stored");
        Ok(())
    }
}
