use std::path::PathBuf;

/// Static admission and placement limits, fixed for the process lifetime.
#[derive(Debug, Clone, Copy)]
pub struct StoreLimits {
    pub max_payload_bytes: u64,
    pub max_disk_quota_bytes: u64,
    pub max_header_count: usize,
    pub max_header_length: usize,
    pub max_id_length: usize,
    pub max_blobs_per_shard: u64,
}

impl StoreLimits {
    /// Number of shard directories.
    ///
    /// Derived once from the quota-to-shard-capacity ratio. Growing it at
    /// runtime would invalidate existing placements, so it stays fixed for
    /// the lifetime of the on-disk data set.
    pub fn shard_count(&self) -> u32 {
        let shard_capacity = self
            .max_blobs_per_shard
            .saturating_mul(self.max_payload_bytes);
        if shard_capacity == 0 {
            return 1;
        }

        let count = self.max_disk_quota_bytes.div_ceil(shard_capacity).max(1);
        u32::try_from(count).unwrap_or(u32::MAX)
    }
}

impl Default for StoreLimits {
    fn default() -> Self {
        Self {
            max_payload_bytes: 10 * 1024 * 1024,
            max_disk_quota_bytes: 1024 * 1024 * 1024,
            max_header_count: 20,
            max_header_length: 50,
            max_id_length: 200,
            max_blobs_per_shard: 100,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub storage_root: PathBuf,
    pub limits: StoreLimits,
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = StoreLimits::default();

        Self {
            listen_addr: std::env::var("LISTEN_ADDR")
                .unwrap_or_else(|_| "127.0.0.1:21494".to_string()),
            storage_root: std::env::var("STORAGE_ROOT")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("/data/blobs")),
            limits: StoreLimits {
                max_payload_bytes: std::env::var("MAX_PAYLOAD_BYTES")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(defaults.max_payload_bytes),
                max_disk_quota_bytes: std::env::var("MAX_DISK_QUOTA_BYTES")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(defaults.max_disk_quota_bytes),
                max_header_count: std::env::var("MAX_HEADER_COUNT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(defaults.max_header_count),
                max_header_length: std::env::var("MAX_HEADER_LENGTH")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(defaults.max_header_length),
                max_id_length: std::env::var("MAX_ID_LENGTH")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(defaults.max_id_length),
                max_blobs_per_shard: std::env::var("MAX_BLOBS_PER_SHARD")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(defaults.max_blobs_per_shard),
            },
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.listen_addr.is_empty() {
            return Err("LISTEN_ADDR cannot be empty".to_string());
        }

        if self.storage_root.as_os_str().is_empty() {
            return Err("STORAGE_ROOT cannot be empty".to_string());
        }

        if self.limits.max_payload_bytes == 0 {
            return Err("MAX_PAYLOAD_BYTES must be positive".to_string());
        }

        if self.limits.max_blobs_per_shard == 0 {
            return Err("MAX_BLOBS_PER_SHARD must be positive".to_string());
        }

        if self.limits.max_id_length == 0 {
            return Err("MAX_ID_LENGTH must be positive".to_string());
        }

        if self.limits.max_disk_quota_bytes < self.limits.max_payload_bytes {
            return Err(
                "MAX_DISK_QUOTA_BYTES must be at least MAX_PAYLOAD_BYTES".to_string()
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_limits_derive_two_shards() {
        // 1 GiB quota over shards holding 100 blobs of 10 MiB each.
        let limits = StoreLimits::default();
        assert_eq!(limits.shard_count(), 2);
    }

    #[test]
    fn test_shard_count_rounds_up() {
        let limits = StoreLimits {
            max_payload_bytes: 10,
            max_disk_quota_bytes: 101,
            max_blobs_per_shard: 1,
            ..StoreLimits::default()
        };
        assert_eq!(limits.shard_count(), 11);
    }

    #[test]
    fn test_shard_count_is_at_least_one() {
        let limits = StoreLimits {
            max_payload_bytes: 1024,
            max_disk_quota_bytes: 1,
            max_blobs_per_shard: 100,
            ..StoreLimits::default()
        };
        assert_eq!(limits.shard_count(), 1);
    }

    #[test]
    fn test_validate_rejects_quota_below_payload_size() {
        let config = Config {
            listen_addr: "127.0.0.1:0".to_string(),
            storage_root: PathBuf::from("/tmp/blobs"),
            limits: StoreLimits {
                max_payload_bytes: 1024,
                max_disk_quota_bytes: 512,
                ..StoreLimits::default()
            },
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_accepts_defaults() {
        let config = Config {
            listen_addr: "127.0.0.1:21494".to_string(),
            storage_root: PathBuf::from("/data/blobs"),
            limits: StoreLimits::default(),
        };

        assert!(config.validate().is_ok());
    }
}
