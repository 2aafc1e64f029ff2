pub mod app_conf;
pub mod booking_store_conf;
pub mod cron_conf;
pub mod email_conf;
pub mod site_conf;

pub use app_conf::AppConfig;
pub use booking_store_conf::BookingStoreConfig;
pub use cron_conf::CronConfig;
pub use email_conf::{EmailConfig, SmtpSecurity};
pub use site_conf::SiteConfig;

/// Common configuration error type
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Environment variable not found: {0}")]
    EnvVarNotFound(String),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}
