use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

use crate::application::admission::{AdmissionError, AdmissionRequest, AdmissionValidator};
use crate::application::ports::{BlobReader, BlobStore, StoreError};
use crate::domain::value_objects::BlobMetadata;

#[derive(Debug, Error)]
pub enum StoreBlobError {
    #[error(transparent)]
    Rejected(#[from] AdmissionError),

    #[error("storage error: {0}")]
    Storage(#[from] StoreError),
}

/// Use case: accept and persist an inbound blob.
pub struct StoreBlobUseCase {
    store: Arc<dyn BlobStore>,
    validator: AdmissionValidator,
}

impl StoreBlobUseCase {
    pub fn new(store: Arc<dyn BlobStore>, validator: AdmissionValidator) -> Self {
        Self { store, validator }
    }

    /// Validate the request, then stream the payload into the store.
    pub async fn execute(
        &self,
        id: &str,
        content_length: Option<u64>,
        metadata: BlobMetadata,
        payload: BlobReader,
    ) -> Result<(), StoreBlobError> {
        let request = AdmissionRequest {
            id,
            content_length,
            metadata: &metadata,
        };
        let id = self.validator.validate(&request, self.store.usage_bytes())?;

        self.store.create(&id, payload, &metadata).await?;
        debug!(id = %id, "blob accepted");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::MockBlobStore;
    use crate::config::StoreLimits;
    use std::io::Cursor;
    use std::sync::Arc;

    fn use_case(mock: MockBlobStore) -> StoreBlobUseCase {
        StoreBlobUseCase::new(
            Arc::new(mock),
            AdmissionValidator::new(StoreLimits::default()),
        )
    }

    #[tokio::test]
    async fn test_store_blob_happy_path() {
        let mut mock = MockBlobStore::new();
        mock.expect_usage_bytes().return_const(0u64);
        mock.expect_create().times(1).returning(|_, _, _| Ok(()));

        let metadata = BlobMetadata::from_headers([("content-type", "text/plain")]);
        let payload: BlobReader = Box::pin(Cursor::new(b"hello".to_vec()));

        let result = use_case(mock)
            .execute("greeting.txt", Some(5), metadata, payload)
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_rejected_request_never_reaches_store() {
        let mut mock = MockBlobStore::new();
        mock.expect_usage_bytes().return_const(0u64);
        // No create expectation: a rejected request must not touch storage.

        let metadata = BlobMetadata::from_headers([]);
        let payload: BlobReader = Box::pin(Cursor::new(b"hello".to_vec()));

        let result = use_case(mock)
            .execute("bad id", Some(5), metadata, payload)
            .await;

        assert!(matches!(result, Err(StoreBlobError::Rejected(_))));
    }

    #[tokio::test]
    async fn test_storage_failure_is_propagated() {
        let mut mock = MockBlobStore::new();
        mock.expect_usage_bytes().return_const(0u64);
        mock.expect_create().times(1).returning(|_, _, _| {
            Err(StoreError::WriteFailure("payload was empty".to_string()))
        });

        let metadata = BlobMetadata::from_headers([]);
        let payload: BlobReader = Box::pin(Cursor::new(Vec::new()));

        let result = use_case(mock)
            .execute("empty.bin", Some(0), metadata, payload)
            .await;

        assert!(matches!(
            result,
            Err(StoreBlobError::Storage(StoreError::WriteFailure(_)))
        ));
    }
}
