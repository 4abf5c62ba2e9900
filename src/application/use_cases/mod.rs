mod delete_blob;
mod fetch_blob;
mod store_blob;

pub use delete_blob::{DeleteBlobError, DeleteBlobUseCase};
pub use fetch_blob::{FetchBlobError, FetchBlobUseCase};
pub use store_blob::{StoreBlobError, StoreBlobUseCase};
