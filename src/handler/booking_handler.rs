use axum::{extract::{Query, State}, Json};
use std::sync::Arc;
use tracing::{error, info, instrument};

use crate::dto::booking_dto::{BookingQuery, DocumentPresenceDto, DocumentsQuery};
use crate::model::booking::Booking;
use crate::service::document_service::DocumentService;
use crate::util::booking_store::BookingStoreError;
use crate::util::error::HandlerError;

fn required_id(id: Option<String>) -> Result<String, HandlerError> {
    match id.map(|s| s.trim().to_string()) {
        Some(id) if !id.is_empty() => Ok(id),
        _ => Err(HandlerError::bad_request("Booking ID is required")),
    }
}

#[instrument(skip(service))]
pub async fn get_booking_handler(
    State(service): State<Arc<DocumentService>>,
    Query(query): Query<BookingQuery>,
) -> Result<Json<Booking>, HandlerError> {
    let booking_id = required_id(query.id)?;
    info!("[get_booking_handler] Looking up booking {}", booking_id);

    match service.get_booking(&booking_id).await {
        Ok(booking) => Ok(Json(booking)),
        Err(BookingStoreError::InvalidBookingId(_)) => Err(HandlerError::bad_request("Invalid booking ID")),
        Err(BookingStoreError::UpstreamStatus { status, body }) => {
            error!("[get_booking_handler] Booking API returned {}: {}", status, body);
            Err(HandlerError::internal(format!("Failed to fetch booking data ({})", status)))
        }
        Err(e) => {
            error!("[get_booking_handler] Failed to fetch booking {}: {}", booking_id, e);
            Err(HandlerError::internal("Failed to fetch booking information"))
        }
    }
}

#[instrument(skip(service))]
pub async fn check_documents_handler(
    State(service): State<Arc<DocumentService>>,
    Query(query): Query<DocumentsQuery>,
) -> Result<Json<DocumentPresenceDto>, HandlerError> {
    let booking_id = required_id(query.booking_id)?;
    let has_documents = service.has_documents_or_false(&booking_id).await;
    info!("[check_documents_handler] Booking {} has documents: {}", booking_id, has_documents);
    Ok(Json(DocumentPresenceDto::new(booking_id, has_documents)))
}
