use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

use crate::application::ports::{BlobStore, StoreError};
use crate::domain::value_objects::BlobId;

#[derive(Debug, Error)]
pub enum DeleteBlobError {
    #[error("Blob with id {0} was not found")]
    NotFound(String),

    #[error("storage error: {0}")]
    Storage(StoreError),
}

/// Use case: remove a stored blob.
pub struct DeleteBlobUseCase {
    store: Arc<dyn BlobStore>,
}

impl DeleteBlobUseCase {
    pub fn new(store: Arc<dyn BlobStore>) -> Self {
        Self { store }
    }

    pub async fn execute(&self, id: &BlobId) -> Result<(), DeleteBlobError> {
        match self.store.delete(id).await {
            Ok(()) => {
                debug!(id = %id, "blob deleted");
                Ok(())
            }
            Err(StoreError::NotFound(_)) => Err(DeleteBlobError::NotFound(id.to_string())),
            Err(e) => Err(DeleteBlobError::Storage(e)),
        }
    }
}
