use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;

use crate::api::handlers::{
    create_blob_handler, delete_blob_handler, get_blob_handler, health_handler,
};
use crate::application::use_cases::{DeleteBlobUseCase, FetchBlobUseCase, StoreBlobUseCase};

/// Application state container
pub struct AppState {
    pub store_use_case: Arc<StoreBlobUseCase>,
    pub fetch_use_case: Arc<FetchBlobUseCase>,
    pub delete_use_case: Arc<DeleteBlobUseCase>,
}

/// Create router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route(
            "/blobs/{id}",
            post(create_blob_handler).with_state(state.store_use_case),
        )
        .route(
            "/blobs/{id}",
            get(get_blob_handler).with_state(state.fetch_use_case),
        )
        .route(
            "/blobs/{id}",
            delete(delete_blob_handler).with_state(state.delete_use_case),
        )
}
