use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("blob id cannot be empty")]
    EmptyBlobId,

    #[error("blob id can only contain letters, numbers, dots, underscores, and hyphens")]
    InvalidBlobIdCharacters,

    #[error("blob id cannot be a reserved path name")]
    ReservedBlobId,
}
