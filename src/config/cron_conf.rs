use std::env;
use tracing::{info, warn};

/// Shared secret guarding the scheduled-job trigger
#[derive(Debug, Clone, Default)]
pub struct CronConfig {
    pub secret: Option<String>,
}

impl CronConfig {
    pub fn from_env() -> Self {
        let secret = env::var("CRON_SECRET").ok().filter(|s| !s.trim().is_empty());
        match &secret {
            Some(s) => info!("Cron secret loaded (length: {} chars)", s.len()),
            None => warn!("CRON_SECRET not set, the reminder trigger will reject every request"),
        }
        CronConfig { secret }
    }

    /// Whether an `Authorization` header value carries the configured bearer secret
    pub fn authorizes(&self, auth_header: Option<&str>) -> bool {
        match (&self.secret, auth_header) {
            (Some(secret), Some(header)) => header
                .strip_prefix("Bearer ")
                .map(|token| token == secret)
                .unwrap_or(false),
            _ => false,
        }
    }
}
