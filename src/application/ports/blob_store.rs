use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use std::pin::Pin;
use thiserror::Error;
use tokio::io::AsyncRead;

use crate::domain::value_objects::{BlobId, BlobMetadata};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("blob not found: {0}")]
    NotFound(String),

    #[error("write failed: {0}")]
    WriteFailure(String),
}

/// Type alias for the streaming payload handle.
pub type BlobReader = Pin<Box<dyn AsyncRead + Send>>;

/// Port for durable blob storage operations.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Persist a payload stream and its metadata record under `id`.
    ///
    /// A pre-existing blob with the same id is replaced wholesale. On any
    /// failure the partially written blob is removed before the error is
    /// returned.
    async fn create(
        &self,
        id: &BlobId,
        payload: BlobReader,
        metadata: &BlobMetadata,
    ) -> Result<(), StoreError>;

    /// Open the stored metadata record and a payload read handle.
    ///
    /// Absence is a normal outcome, not an error.
    async fn find(&self, id: &BlobId) -> Result<Option<(BlobMetadata, BlobReader)>, StoreError>;

    /// Remove the blob and its metadata. Deleting an absent blob is
    /// `StoreError::NotFound`.
    async fn delete(&self, id: &BlobId) -> Result<(), StoreError>;

    /// Current running total of stored bytes.
    fn usage_bytes(&self) -> u64;
}
