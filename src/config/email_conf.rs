use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use tracing::{debug, error, info, warn};

use crate::config::ConfigError;

/// How the SMTP connection is secured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SmtpSecurity {
    /// Plain connection, only for local mail sinks
    None,
    /// Upgrade a plain connection (usually port 587)
    StartTls,
    /// TLS from the first byte (usually port 465)
    Implicit,
}

impl SmtpSecurity {
    /// Maps the `SMTP_USE_TLS` / `SMTP_USE_STARTTLS` pair
    pub fn from_flags(use_tls: bool, use_starttls: bool) -> Self {
        match (use_tls, use_starttls) {
            (false, _) => SmtpSecurity::None,
            (true, true) => SmtpSecurity::StartTls,
            (true, false) => SmtpSecurity::Implicit,
        }
    }
}

/// Outgoing mail settings: the SMTP relay, the sender identity and the
/// administrator who receives upload notifications.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_username: String,
    pub smtp_password: String,
    pub security: SmtpSecurity,
    pub from_email: String,
    /// Display name on outgoing mail
    pub from_name: String,
    pub connection_timeout_secs: u64,
    /// Recipient of document upload notifications
    pub admin_email: String,
}

fn required(name: &str) -> Result<String, ConfigError> {
    env::var(name).map_err(|_| {
        error!("{} environment variable not found", name);
        ConfigError::EnvVarNotFound(name.to_string())
    })
}

fn or_default(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| {
        warn!("{} not set, defaulting to {}", name, default);
        default.to_string()
    })
}

fn parsed<T: FromStr>(name: &str, default: &str) -> Result<T, ConfigError> {
    or_default(name, default).parse::<T>().map_err(|_| {
        error!("Invalid {} value", name);
        ConfigError::InvalidValue(format!("Invalid {} value", name))
    })
}

impl EmailConfig {
    /// Expected environment variables:
    /// - SMTP_HOST, SMTP_USERNAME, SMTP_PASSWORD, SMTP_FROM_EMAIL (required)
    /// - SMTP_PORT (587), SMTP_USE_TLS (true), SMTP_USE_STARTTLS (true)
    /// - SMTP_FROM_NAME (Villa Claudia), SMTP_CONNECTION_TIMEOUT (30)
    /// - ADMIN_EMAIL (administration@villa-claudia.eu)
    pub fn from_env() -> Result<Self, ConfigError> {
        info!("Loading email configuration from environment variables");

        let smtp_host = required("SMTP_HOST")?;
        let smtp_username = required("SMTP_USERNAME")?;
        let smtp_password = required("SMTP_PASSWORD")?;
        let from_email = required("SMTP_FROM_EMAIL")?;

        let smtp_port = parsed::<u16>("SMTP_PORT", "587")?;
        let security = SmtpSecurity::from_flags(
            parsed::<bool>("SMTP_USE_TLS", "true")?,
            parsed::<bool>("SMTP_USE_STARTTLS", "true")?,
        );
        let connection_timeout_secs = parsed::<u64>("SMTP_CONNECTION_TIMEOUT", "30")?;
        let from_name = or_default("SMTP_FROM_NAME", "Villa Claudia");
        let admin_email = or_default("ADMIN_EMAIL", "administration@villa-claudia.eu");

        debug!(
            smtp_host = %smtp_host,
            smtp_port,
            security = ?security,
            from_email = %from_email,
            admin_email = %admin_email,
            password_len = smtp_password.len(),
            "SMTP settings"
        );

        let config = EmailConfig {
            smtp_host,
            smtp_port,
            smtp_username,
            smtp_password,
            security,
            from_email,
            from_name,
            connection_timeout_secs,
            admin_email,
        };
        config.validate()?;
        info!("Email configuration loaded successfully");
        Ok(config)
    }

    /// Local mail sink (MailHog on port 1025)
    pub fn from_test_env() -> Self {
        EmailConfig {
            smtp_host: "localhost".to_string(),
            smtp_port: 1025,
            smtp_username: "test".to_string(),
            smtp_password: "test".to_string(),
            security: SmtpSecurity::None,
            from_email: "test@example.com".to_string(),
            from_name: "Test Villa".to_string(),
            connection_timeout_secs: 10,
            admin_email: "admin@example.com".to_string(),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let problem = if self.smtp_host.is_empty() {
            Some("SMTP host cannot be empty")
        } else if self.smtp_port == 0 {
            Some("SMTP port cannot be 0")
        } else if self.smtp_username.is_empty() || self.smtp_password.is_empty() {
            Some("SMTP credentials cannot be empty")
        } else if !self.from_email.contains('@') {
            Some("Invalid from email format")
        } else if !self.admin_email.contains('@') {
            Some("Invalid admin email format")
        } else if self.connection_timeout_secs == 0 {
            Some("Connection timeout cannot be 0")
        } else {
            None
        };

        match problem {
            Some(msg) => {
                error!("Email configuration invalid: {}", msg);
                Err(ConfigError::ValidationError(msg.to_string()))
            }
            None => Ok(()),
        }
    }

    /// `host:port` of the SMTP relay
    pub fn smtp_address(&self) -> String {
        format!("{}:{}", self.smtp_host, self.smtp_port)
    }
}
