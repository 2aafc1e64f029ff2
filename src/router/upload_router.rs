use axum::{extract::DefaultBodyLimit, routing::post, Router};
use std::sync::Arc;

use crate::handler::upload_handler::upload_documents_handler;
use crate::service::upload_service::UploadService;

pub fn upload_router(service: Arc<UploadService>, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/api/upload", post(upload_documents_handler))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .with_state(service)
}
