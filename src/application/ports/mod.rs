mod blob_store;

pub use blob_store::{BlobReader, BlobStore, StoreError};

#[cfg(test)]
pub use blob_store::MockBlobStore;
