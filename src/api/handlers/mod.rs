pub mod create;
pub mod delete;
pub mod get;
pub mod health;

use serde::Serialize;

pub use create::create_blob_handler;
pub use delete::delete_blob_handler;
pub use get::get_blob_handler;
pub use health::health_handler;

/// Body returned by the mutating routes.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: String,
    pub timestamp: String,
}

impl StatusResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
