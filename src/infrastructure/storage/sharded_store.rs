use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::fs::{self, File};
use tokio::io::{AsyncReadExt, AsyncWriteExt, BufReader, BufWriter};
use tracing::{debug, warn};

use crate::application::ports::{BlobReader, BlobStore, StoreError};
use crate::config::StoreLimits;
use crate::domain::value_objects::{BlobId, BlobMetadata, ShardId};
use crate::infrastructure::storage::{BlobPaths, ShardAssigner};

/// Buffer size for streaming payload I/O. 256KB provides good throughput
/// for most storage systems while bounding per-request memory.
const BUFFER_SIZE: usize = 256 * 1024;

/// Filesystem-backed sharded blob store.
///
/// Each blob lives in its own directory under its shard directory and the
/// directory holds exactly two files, the payload (named by the blob id)
/// and the metadata side-file. A blob directory either holds both files or
/// does not exist; failed creates remove whatever they managed to write
/// before the error is surfaced.
///
/// The store keeps a running total of stored bytes, updated on every
/// create and delete and rebuilt from disk at startup. Admission reads
/// that total for its quota check, which replaces estimating usage from
/// directory attributes.
pub struct ShardedFilesystemStore {
    paths: BlobPaths,
    assigner: ShardAssigner,
    usage_bytes: AtomicU64,
    durable_writes: bool,
}

impl ShardedFilesystemStore {
    pub fn new(root: PathBuf, limits: StoreLimits) -> Self {
        Self::with_durability(root, limits, true)
    }

    pub fn with_durability(root: PathBuf, limits: StoreLimits, durable_writes: bool) -> Self {
        Self {
            paths: BlobPaths::new(root),
            assigner: ShardAssigner::new(limits.shard_count()),
            usage_bytes: AtomicU64::new(0),
            durable_writes,
        }
    }

    pub fn assigner(&self) -> &ShardAssigner {
        &self.assigner
    }

    /// Create the shard directory fan-out and rebuild the usage total and
    /// per-shard live counters from what is already on disk.
    pub async fn init(&self) -> Result<(), StoreError> {
        for index in 0..self.assigner.shard_count() {
            fs::create_dir_all(self.paths.shard_dir(ShardId::new(index))).await?;
        }

        self.reconcile().await
    }

    /// Walk the shard directories once, counting live blobs and stored
    /// bytes. Runs at startup only; afterwards the figures are maintained
    /// incrementally.
    async fn reconcile(&self) -> Result<(), StoreError> {
        let mut total = 0u64;

        for index in 0..self.assigner.shard_count() {
            let shard = ShardId::new(index);
            let mut live = 0u64;

            let mut entries = fs::read_dir(self.paths.shard_dir(shard)).await?;
            while let Some(entry) = entries.next_entry().await? {
                if !entry.file_type().await?.is_dir() {
                    continue;
                }
                total += dir_size(&entry.path()).await?;
                live += 1;
            }

            self.assigner.set_live_count(shard, live);
        }

        self.usage_bytes.store(total, Ordering::Relaxed);
        debug!(usage_bytes = total, "storage usage reconciled");

        Ok(())
    }

    fn add_usage(&self, bytes: u64) {
        self.usage_bytes.fetch_add(bytes, Ordering::Relaxed);
    }

    fn sub_usage(&self, bytes: u64) {
        let _ = self
            .usage_bytes
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |current| {
                Some(current.saturating_sub(bytes))
            });
    }

    /// Remove a blob directory and roll its bytes out of the usage total.
    async fn remove_blob_dir(&self, dir: &Path) -> Result<(), StoreError> {
        let freed = dir_size(dir).await.unwrap_or(0);
        fs::remove_dir_all(dir).await?;
        self.sub_usage(freed);
        Ok(())
    }
}

#[async_trait]
impl BlobStore for ShardedFilesystemStore {
    async fn create(
        &self,
        id: &BlobId,
        payload: BlobReader,
        metadata: &BlobMetadata,
    ) -> Result<(), StoreError> {
        let shard = self.assigner.shard_for(id);
        let blob_dir = self.paths.blob_dir(shard, id);

        // Last-writer-wins: an existing blob with this id is replaced
        // wholesale, counters and usage included.
        if fs::metadata(&blob_dir).await.is_ok() {
            debug!(id = %id, "replacing existing blob");
            self.remove_blob_dir(&blob_dir).await?;
            self.assigner.release(id);
        }

        fs::create_dir_all(&blob_dir).await?;

        let payload_path = self.paths.payload_path(shard, id);
        let metadata_path = self.paths.metadata_path(shard, id);

        let written = tokio::try_join!(
            write_payload(&payload_path, payload, self.durable_writes),
            write_metadata(&metadata_path, metadata),
        );

        let (payload_bytes, metadata_bytes) = match written {
            Ok(sizes) => sizes,
            Err(e) => {
                warn!(id = %id, error = %e, "blob write failed, removing partial blob directory");
                let _ = fs::remove_dir_all(&blob_dir).await;
                return Err(e);
            }
        };

        // A drained stream that produced nothing is a truncated or aborted
        // upload, not an empty blob.
        if payload_bytes == 0 {
            warn!(id = %id, "payload stream produced no bytes, removing blob directory");
            let _ = fs::remove_dir_all(&blob_dir).await;
            return Err(StoreError::WriteFailure(format!(
                "payload for blob {id} was empty"
            )));
        }

        self.add_usage(payload_bytes + metadata_bytes);
        self.assigner.acquire(id);
        debug!(id = %id, shard = %shard, bytes = payload_bytes, "blob stored");

        Ok(())
    }

    async fn find(&self, id: &BlobId) -> Result<Option<(BlobMetadata, BlobReader)>, StoreError> {
        let shard = self.assigner.shard_for(id);

        let metadata_bytes = match fs::read(self.paths.metadata_path(shard, id)).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::Io(e)),
        };

        let metadata = BlobMetadata::from_json_bytes(&metadata_bytes).map_err(|e| {
            StoreError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
        })?;

        let payload = match File::open(self.paths.payload_path(shard, id)).await {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::Io(e)),
        };

        let reader: BlobReader = Box::pin(BufReader::new(payload));
        Ok(Some((metadata, reader)))
    }

    async fn delete(&self, id: &BlobId) -> Result<(), StoreError> {
        let shard = self.assigner.shard_for(id);
        let blob_dir = self.paths.blob_dir(shard, id);

        match fs::metadata(&blob_dir).await {
            Ok(_) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound(id.to_string()));
            }
            Err(e) => return Err(StoreError::Io(e)),
        }

        self.remove_blob_dir(&blob_dir).await?;
        self.assigner.release(id);
        debug!(id = %id, shard = %shard, "blob deleted");

        Ok(())
    }

    fn usage_bytes(&self) -> u64 {
        self.usage_bytes.load(Ordering::Relaxed)
    }
}

/// Drain the payload stream into the file, returning the byte count.
async fn write_payload(
    path: &Path,
    mut payload: BlobReader,
    durable: bool,
) -> Result<u64, StoreError> {
    let mut file = BufWriter::with_capacity(BUFFER_SIZE * 2, File::create(path).await?);
    let mut total_bytes = 0u64;
    let mut buffer = vec![0u8; BUFFER_SIZE];

    loop {
        let n = payload.read(&mut buffer).await?;
        if n == 0 {
            break;
        }

        file.write_all(&buffer[..n]).await?;
        total_bytes += n as u64;
    }

    file.flush().await?;

    if durable {
        file.get_mut().sync_all().await?;
    }

    Ok(total_bytes)
}

/// Encode and persist the metadata side-file, returning its size.
async fn write_metadata(path: &Path, metadata: &BlobMetadata) -> Result<u64, StoreError> {
    let encoded = metadata.to_json_bytes().map_err(|e| {
        StoreError::WriteFailure(format!("failed to encode metadata record: {e}"))
    })?;

    fs::write(path, &encoded).await?;

    Ok(encoded.len() as u64)
}

/// Sum of the file sizes directly inside a blob directory.
async fn dir_size(dir: &Path) -> Result<u64, StoreError> {
    let mut total = 0u64;

    let mut entries = fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let meta = entry.metadata().await?;
        if meta.is_file() {
            total += meta.len();
        }
    }

    Ok(total)
}
