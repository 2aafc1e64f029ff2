use axum::{routing::get, Router};
use std::sync::Arc;

use crate::handler::booking_handler::{check_documents_handler, get_booking_handler};
use crate::service::document_service::DocumentService;

pub fn booking_router(service: Arc<DocumentService>) -> Router {
    Router::new()
        .route("/api/booking", get(get_booking_handler))
        .route("/api/admin/check-documents", get(check_documents_handler))
        .with_state(service)
}
