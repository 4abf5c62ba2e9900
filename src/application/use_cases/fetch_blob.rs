use std::sync::Arc;
use thiserror::Error;

use crate::application::ports::{BlobReader, BlobStore, StoreError};
use crate::domain::value_objects::{BlobId, BlobMetadata};

#[derive(Debug, Error)]
pub enum FetchBlobError {
    #[error("Blob with id {0} was not found")]
    NotFound(String),

    #[error("storage error: {0}")]
    Storage(#[from] StoreError),
}

/// Use case: open a stored blob for streaming back to the caller.
pub struct FetchBlobUseCase {
    store: Arc<dyn BlobStore>,
}

impl FetchBlobUseCase {
    pub fn new(store: Arc<dyn BlobStore>) -> Self {
        Self { store }
    }

    pub async fn execute(
        &self,
        id: &BlobId,
    ) -> Result<(BlobMetadata, BlobReader), FetchBlobError> {
        match self.store.find(id).await? {
            Some(found) => Ok(found),
            None => Err(FetchBlobError::NotFound(id.to_string())),
        }
    }
}
