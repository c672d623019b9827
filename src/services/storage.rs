//! Vote image storage implementation
//!
//! Votes may carry an attached image. The vote recorder only depends on the
//! FileStore trait; the local-disk implementation below stores images as
//! uuid-named files under a configured root directory.

use std::path::PathBuf;
use async_trait::async_trait;
use tracing::debug;
use crate::config::settings::StorageConfig;
use crate::utils::errors::{Result, RunwayVoteError};
use crate::utils::helpers::generate_uuid;

/// Abstract blob store for vote image attachments
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Store the bytes and return an opaque reference to them
    async fn store(&self, bytes: &[u8], extension: Option<&str>) -> Result<String>;

    /// Delete the blob behind a previously returned reference
    async fn delete(&self, reference: &str) -> Result<()>;
}

/// File store writing to the local filesystem
#[derive(Debug, Clone)]
pub struct LocalFileStore {
    root: PathBuf,
}

impl LocalFileStore {
    /// Create a new LocalFileStore rooted at the configured path
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            root: PathBuf::from(&config.root_path),
        }
    }

    fn resolve(&self, reference: &str) -> Result<PathBuf> {
        // References are bare file names produced by store(); anything with a
        // path separator cannot be one of ours
        if reference.is_empty() || reference.contains('/') || reference.contains('\\') {
            return Err(RunwayVoteError::InvalidInput(format!(
                "Invalid image reference: {}",
                reference
            )));
        }

        Ok(self.root.join(reference))
    }
}

#[async_trait]
impl FileStore for LocalFileStore {
    async fn store(&self, bytes: &[u8], extension: Option<&str>) -> Result<String> {
        tokio::fs::create_dir_all(&self.root).await?;

        let reference = match extension {
            Some(ext) => format!("{}.{}", generate_uuid(), ext.trim_start_matches('.')),
            None => generate_uuid(),
        };

        let path = self.root.join(&reference);
        tokio::fs::write(&path, bytes).await?;

        debug!(reference = %reference, size = bytes.len(), "Stored vote image");
        Ok(reference)
    }

    async fn delete(&self, reference: &str) -> Result<()> {
        let path = self.resolve(reference)?;
        tokio::fs::remove_file(&path).await?;

        debug!(reference = %reference, "Deleted vote image");
        Ok(())
    }
}
