use axum::{
    extract::{Path, State},
    response::Json,
};
use std::sync::Arc;

use crate::api::errors::ApiError;
use crate::api::handlers::StatusResponse;
use crate::application::use_cases::DeleteBlobUseCase;
use crate::domain::value_objects::BlobId;

/// DELETE /blobs/{id}
/// Remove a stored blob. Deleting an absent blob reports not-found.
pub async fn delete_blob_handler(
    State(use_case): State<Arc<DeleteBlobUseCase>>,
    Path(id): Path<String>,
) -> Result<Json<StatusResponse>, ApiError> {
    let blob_id = BlobId::parse(&id)
        .map_err(|_| ApiError::not_found(format!("Blob with id {id} was not found")))?;

    use_case.execute(&blob_id).await?;

    Ok(Json(StatusResponse::ok()))
}
