use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{info, Level};

use blobstore::{
    api::{create_router, router::AppState},
    application::{
        admission::AdmissionValidator,
        ports::BlobStore,
        use_cases::{DeleteBlobUseCase, FetchBlobUseCase, StoreBlobUseCase},
    },
    infrastructure::storage::ShardedFilesystemStore,
    Config,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing with structured logging
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_target(true)
        .init();

    info!("Starting blob storage service");

    // Load configuration
    let config = Config::from_env();
    config.validate()?;
    info!("Configuration loaded and validated");

    // Initialize the store and rebuild counters from disk
    let store = Arc::new(ShardedFilesystemStore::new(
        config.storage_root.clone(),
        config.limits,
    ));
    store.init().await?;
    info!(
        shard_count = config.limits.shard_count(),
        usage_bytes = store.usage_bytes(),
        "Storage initialized"
    );
    let store: Arc<dyn BlobStore> = store;

    // Initialize use cases (application layer)
    let validator = AdmissionValidator::new(config.limits);

    let state = AppState {
        store_use_case: Arc::new(StoreBlobUseCase::new(Arc::clone(&store), validator)),
        fetch_use_case: Arc::new(FetchBlobUseCase::new(Arc::clone(&store))),
        delete_use_case: Arc::new(DeleteBlobUseCase::new(Arc::clone(&store))),
    };

    // Create router
    let app = create_router(state);

    // Start server
    info!("Listening on {}", config.listen_addr);
    let listener = TcpListener::bind(&config.listen_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
