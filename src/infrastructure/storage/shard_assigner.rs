use dashmap::DashMap;
use sha2::{Digest, Sha256};

use crate::domain::value_objects::{BlobId, ShardId};

/// Deterministic id-to-shard placement with advisory occupancy counters.
///
/// Placement is a pure function of the id and the fixed shard count. The
/// counters are observability only: they never gate admission or placement,
/// and nothing else may rely on their accuracy.
pub struct ShardAssigner {
    shard_count: u32,
    live_counts: DashMap<ShardId, u64>,
}

impl ShardAssigner {
    pub fn new(shard_count: u32) -> Self {
        Self {
            shard_count: shard_count.max(1),
            live_counts: DashMap::new(),
        }
    }

    pub fn shard_count(&self) -> u32 {
        self.shard_count
    }

    /// Map an id to its shard: the first 32 bits of the SHA-256 digest of
    /// the id, reduced modulo the shard count. Stable across restarts.
    pub fn shard_for(&self, id: &BlobId) -> ShardId {
        let digest = Sha256::digest(id.as_str().as_bytes());
        let prefix = u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]]);
        ShardId::new(prefix % self.shard_count)
    }

    /// Record one more live blob on the id's shard.
    pub fn acquire(&self, id: &BlobId) {
        *self.live_counts.entry(self.shard_for(id)).or_insert(0) += 1;
    }

    /// Record one fewer live blob on the id's shard; saturates at zero.
    pub fn release(&self, id: &BlobId) {
        if let Some(mut count) = self.live_counts.get_mut(&self.shard_for(id)) {
            *count = count.saturating_sub(1);
        }
    }

    pub fn live_count(&self, shard: ShardId) -> u64 {
        self.live_counts
            .get(&shard)
            .map(|entry| *entry.value())
            .unwrap_or(0)
    }

    /// Overwrite a shard's counter with an observed on-disk count.
    pub(crate) fn set_live_count(&self, shard: ShardId, count: u64) {
        self.live_counts.insert(shard, count);
    }
}
