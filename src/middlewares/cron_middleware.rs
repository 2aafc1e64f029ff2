use axum::{body::Body, extract::State, http::{header::AUTHORIZATION, Request}, middleware::Next, response::Response};
use std::sync::Arc;
use tracing::warn;

use crate::config::CronConfig;
use crate::util::error::HandlerError;

/// Lets the request through only with `Authorization: Bearer <CRON_SECRET>`.
pub async fn cron_auth(
    State(config): State<Arc<CronConfig>>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, HandlerError> {
    let auth_header = req.headers().get(AUTHORIZATION).and_then(|v| v.to_str().ok());
    if !config.authorizes(auth_header) {
        if config.secret.is_none() {
            warn!("CRON_SECRET is not set, refusing scheduled job call");
        } else {
            warn!("Unauthorized scheduled job call to {}", req.uri().path());
        }
        return Err(HandlerError::unauthorized("Unauthorized"));
    }
    Ok(next.run(req).await)
}
