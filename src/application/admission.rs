//! Pre-write admission control.
//!
//! Every create request passes through these checks before any payload byte
//! reaches disk. Checks run in a fixed order and the first failure wins.

use thiserror::Error;

use crate::config::StoreLimits;
use crate::domain::errors::DomainError;
use crate::domain::value_objects::{BlobId, BlobMetadata};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AdmissionError {
    #[error("Content-Length header is required")]
    MissingContentLength,

    #[error("blob id length {length} exceeds maximum allowed length of {max} characters")]
    IdTooLong { length: usize, max: usize },

    #[error(transparent)]
    InvalidId(#[from] DomainError),

    #[error("number of metadata headers ({count}) exceeds maximum allowed count of {max}")]
    TooManyHeaders { count: usize, max: usize },

    #[error("metadata header `{name}` exceeds maximum allowed length of {max} characters")]
    HeaderTooLong { name: String, max: usize },

    #[error("total size ({size} bytes) exceeds maximum allowed size of {max} bytes")]
    PayloadTooLarge { size: u64, max: u64 },

    #[error("storing this blob ({required} bytes) would exceed maximum disk quota of {quota} bytes")]
    QuotaExceeded { required: u64, quota: u64 },
}

/// Everything admission needs to know about an inbound create.
#[derive(Debug)]
pub struct AdmissionRequest<'a> {
    pub id: &'a str,
    pub content_length: Option<u64>,
    pub metadata: &'a BlobMetadata,
}

/// Stateless gate applied before any byte of a payload is written.
#[derive(Debug, Clone)]
pub struct AdmissionValidator {
    limits: StoreLimits,
}

impl AdmissionValidator {
    pub fn new(limits: StoreLimits) -> Self {
        Self { limits }
    }

    /// Run the admission checks in order and return the validated id.
    ///
    /// `current_usage` is the store's running total of stored bytes; it is
    /// passed in so validation itself performs no I/O.
    pub fn validate(
        &self,
        request: &AdmissionRequest<'_>,
        current_usage: u64,
    ) -> Result<BlobId, AdmissionError> {
        let content_length = request
            .content_length
            .ok_or(AdmissionError::MissingContentLength)?;

        if request.id.len() > self.limits.max_id_length {
            return Err(AdmissionError::IdTooLong {
                length: request.id.len(),
                max: self.limits.max_id_length,
            });
        }

        let id = BlobId::parse(request.id)?;

        let count = request.metadata.header_count();
        if count > self.limits.max_header_count {
            return Err(AdmissionError::TooManyHeaders {
                count,
                max: self.limits.max_header_count,
            });
        }

        for (name, value) in request.metadata.iter() {
            if name.len() > self.limits.max_header_length
                || value.joined().len() > self.limits.max_header_length
            {
                return Err(AdmissionError::HeaderTooLong {
                    name: name.to_string(),
                    max: self.limits.max_header_length,
                });
            }
        }

        let total_size = content_length.saturating_add(request.metadata.serialized_len());
        if total_size > self.limits.max_payload_bytes {
            return Err(AdmissionError::PayloadTooLarge {
                size: total_size,
                max: self.limits.max_payload_bytes,
            });
        }

        let required = current_usage.saturating_add(total_size);
        if required > self.limits.max_disk_quota_bytes {
            return Err(AdmissionError::QuotaExceeded {
                required,
                quota: self.limits.max_disk_quota_bytes,
            });
        }

        Ok(id)
    }
}
