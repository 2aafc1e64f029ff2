use axum::{middleware, routing::get, Router};
use std::sync::Arc;

use crate::config::CronConfig;
use crate::handler::reminder_handler::document_reminders_handler;
use crate::middlewares::cron_middleware::cron_auth;
use crate::service::reminder_service::ReminderService;

// Scheduler-only route, guarded by the cron secret
pub fn reminder_router(service: Arc<ReminderService>, cron: Arc<CronConfig>) -> Router {
    Router::new()
        .route("/api/cron/document-reminders", get(document_reminders_handler))
        .route_layer(middleware::from_fn_with_state(cron, cron_auth))
        .with_state(service)
}
