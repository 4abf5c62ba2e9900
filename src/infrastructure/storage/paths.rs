use std::path::{Path, PathBuf};

use crate::domain::value_objects::{BlobId, ShardId};

/// Name of the metadata side-file inside each blob directory.
pub const METADATA_FILE_NAME: &str = "headers.json";

/// Utility for generating storage paths.
pub struct BlobPaths {
    root: PathBuf,
}

impl BlobPaths {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Shard directory: `<root>/shard-NNNN`
    pub fn shard_dir(&self, shard: ShardId) -> PathBuf {
        self.root.join(shard.dir_name())
    }

    /// Blob directory: `<root>/shard-NNNN/<id>`
    pub fn blob_dir(&self, shard: ShardId, id: &BlobId) -> PathBuf {
        self.shard_dir(shard).join(id.as_str())
    }

    /// Payload file, named by the blob id itself.
    pub fn payload_path(&self, shard: ShardId, id: &BlobId) -> PathBuf {
        self.blob_dir(shard, id).join(id.as_str())
    }

    /// Metadata side-file next to the payload.
    pub fn metadata_path(&self, shard: ShardId, id: &BlobId) -> PathBuf {
        self.blob_dir(shard, id).join(METADATA_FILE_NAME)
    }
}
