use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, HeaderMap},
    response::Json,
};
use futures_util::StreamExt;
use std::sync::Arc;

use crate::api::errors::ApiError;
use crate::api::handlers::StatusResponse;
use crate::application::ports::BlobReader;
use crate::application::use_cases::StoreBlobUseCase;
use crate::domain::value_objects::BlobMetadata;

/// POST /blobs/{id}
/// Accept a raw payload stream for the given id.
pub async fn create_blob_handler(
    State(use_case): State<Arc<StoreBlobUseCase>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Body,
) -> Result<Json<StatusResponse>, ApiError> {
    let content_length = headers
        .get(header::CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<u64>().ok());

    let metadata = BlobMetadata::from_headers(
        headers
            .iter()
            .filter_map(|(name, value)| value.to_str().ok().map(|v| (name.as_str(), v))),
    );

    // Convert body to async reader
    let stream = body.into_data_stream();
    let reader: BlobReader = Box::pin(tokio_util::io::StreamReader::new(
        stream.map(|result| result.map_err(std::io::Error::other)),
    ));

    use_case
        .execute(&id, content_length, metadata, reader)
        .await?;

    Ok(Json(StatusResponse::ok()))
}
