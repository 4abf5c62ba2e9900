use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::Response,
};
use std::sync::Arc;
use tokio_util::io::ReaderStream;

use crate::api::errors::ApiError;
use crate::application::use_cases::FetchBlobUseCase;
use crate::domain::value_objects::{BlobId, CONTENT_TYPE};

/// Served when the caller stored no content type.
const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// GET /blobs/{id}
/// Stream a stored payload back with its recorded metadata headers.
pub async fn get_blob_handler(
    State(use_case): State<Arc<FetchBlobUseCase>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    // An id that fails validation cannot name a stored blob.
    let blob_id = BlobId::parse(&id)
        .map_err(|_| ApiError::not_found(format!("Blob with id {id} was not found")))?;

    let (metadata, reader) = use_case.execute(&blob_id).await?;

    let mut builder = Response::builder().status(StatusCode::OK);

    for (name, value) in metadata.iter() {
        if name == CONTENT_TYPE {
            continue;
        }
        for v in value.as_slice() {
            builder = builder.header(name, v.as_str());
        }
    }

    let content_type = match metadata.content_type() {
        "" => DEFAULT_CONTENT_TYPE,
        stored => stored,
    };
    builder = builder.header(header::CONTENT_TYPE, content_type);

    let body = Body::from_stream(ReaderStream::new(reader));
    builder
        .body(body)
        .map_err(|e| ApiError::internal_error(format!("Failed to build response: {}", e)))
}
