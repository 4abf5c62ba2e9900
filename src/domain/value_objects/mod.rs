mod blob_id;
mod blob_metadata;
mod shard_id;

pub use blob_id::BlobId;
pub use blob_metadata::{BlobMetadata, HeaderValue, CONTENT_TYPE, METADATA_HEADER_PREFIX};
pub use shard_id::ShardId;
