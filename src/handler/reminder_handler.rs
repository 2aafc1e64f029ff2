use axum::{extract::State, Json};
use chrono::Utc;
use std::sync::Arc;
use tracing::{error, info};

use crate::dto::booking_dto::ReminderRunDto;
use crate::service::reminder_service::ReminderService;
use crate::util::error::HandlerError;

pub async fn document_reminders_handler(
    State(service): State<Arc<ReminderService>>,
) -> Result<Json<ReminderRunDto>, HandlerError> {
    info!("[document_reminders_handler] Starting document reminder run");
    let summary = service.run(Utc::now()).await.map_err(|e| {
        error!("[document_reminders_handler] Reminder run failed: {}", e);
        HandlerError::internal("Failed to process document reminders").with_details(e.to_string())
    })?;

    Ok(Json(ReminderRunDto {
        success: true,
        message: "Document reminders processed successfully".to_string(),
        summary,
    }))
}
