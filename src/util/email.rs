use crate::config::{ConfigError, EmailConfig, SmtpSecurity};
use async_trait::async_trait;
use bytes::Bytes;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{header::ContentType, Attachment, Mailbox, MultiPart, SinglePart},
    transport::smtp::{
        authentication::Credentials,
        client::{Tls, TlsParameters},
    },
};
use tracing::{error, info, instrument};

/// Email service errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum EmailError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("SMTP error: {0}")]
    SmtpError(String),

    #[error("Message building error: {0}")]
    MessageError(String),

    #[error("Address error: {0}")]
    AddressError(String),

    #[error("Attachment error: {0}")]
    AttachmentError(String),
}

impl From<ConfigError> for EmailError {
    fn from(err: ConfigError) -> Self {
        EmailError::ConfigError(err.to_string())
    }
}

/// File attached to an outgoing email
#[derive(Debug, Clone)]
pub struct EmailAttachment {
    pub filename: String,
    pub content: Bytes,
    pub content_type: String,
}

/// Email message builder
#[derive(Debug, Clone)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub text_body: Option<String>,
    pub html_body: Option<String>,
    pub attachments: Vec<EmailAttachment>,
}

impl EmailMessage {
    pub fn new(to: String, subject: String) -> Self {
        Self {
            to,
            subject,
            text_body: None,
            html_body: None,
            attachments: Vec::new(),
        }
    }

    pub fn with_text_body(mut self, body: String) -> Self {
        self.text_body = Some(body);
        self
    }

    pub fn with_html_body(mut self, body: String) -> Self {
        self.html_body = Some(body);
        self
    }

    pub fn with_attachment(mut self, attachment: EmailAttachment) -> Self {
        self.attachments.push(attachment);
        self
    }
}

/// Outbound notification channel
#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send_email(&self, message: EmailMessage) -> Result<(), EmailError>;
}

/// SMTP email service implementation
pub struct SmtpEmailService {
    pub config: EmailConfig,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpEmailService {
    /// Create a new SMTP email service
    #[instrument(skip(config), fields(host = %config.smtp_host, port = config.smtp_port))]
    pub fn new(config: EmailConfig) -> Result<Self, EmailError> {
        info!("Initializing SMTP email service");

        config.validate().map_err(EmailError::from)?;

        let mut transport_builder = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.smtp_host)
            .port(config.smtp_port)
            .timeout(Some(std::time::Duration::from_secs(config.connection_timeout_secs)));

        let tls_parameters = || {
            TlsParameters::new(config.smtp_host.clone())
                .map_err(|e| EmailError::ConfigError(format!("TLS configuration error: {}", e)))
        };
        transport_builder = match config.security {
            SmtpSecurity::None => transport_builder.tls(Tls::None),
            SmtpSecurity::StartTls => transport_builder.tls(Tls::Required(tls_parameters()?)),
            SmtpSecurity::Implicit => transport_builder.tls(Tls::Wrapper(tls_parameters()?)),
        };

        if !config.smtp_username.is_empty() && !config.smtp_password.is_empty() {
            let credentials = Credentials::new(
                config.smtp_username.clone(),
                config.smtp_password.clone(),
            );
            transport_builder = transport_builder.credentials(credentials);
        }

        let transport = transport_builder.build();

        info!("SMTP email service initialized successfully");
        Ok(Self { config, transport })
    }

    /// Build a lettre Message from EmailMessage
    pub fn build_message(&self, email_message: EmailMessage) -> Result<Message, EmailError> {
        build_message(&self.config, email_message)
    }
}

#[async_trait]
impl EmailSender for SmtpEmailService {
    #[instrument(skip(self, message), fields(to = %message.to, subject = %message.subject, attachments = message.attachments.len()))]
    async fn send_email(&self, message: EmailMessage) -> Result<(), EmailError> {
        info!("Sending email to: {}", message.to);

        validate_email_address(&message.to)?;

        let email_message = self.build_message(message)?;

        self.transport
            .send(email_message)
            .await
            .map_err(|e| {
                error!("Failed to send email: {}", e);
                EmailError::SmtpError(format!("Failed to send email: {}", e))
            })?;

        info!("Email sent successfully");
        Ok(())
    }
}

fn build_message(config: &EmailConfig, email_message: EmailMessage) -> Result<Message, EmailError> {
    let from_mailbox: Mailbox = format!("{} <{}>", config.from_name, config.from_email)
        .parse()
        .map_err(|e| EmailError::AddressError(format!("Invalid from address: {}", e)))?;

    let to_mailbox: Mailbox = email_message.to
        .parse()
        .map_err(|e| EmailError::AddressError(format!("Invalid to address: {}", e)))?;

    let message_builder = Message::builder()
        .from(from_mailbox)
        .to(to_mailbox)
        .subject(&email_message.subject);

    if email_message.attachments.is_empty() {
        return match (email_message.text_body, email_message.html_body) {
            (Some(text), Some(html)) => message_builder
                .multipart(MultiPart::alternative_plain_html(text, html))
                .map_err(|e| EmailError::MessageError(format!("Failed to build multipart message: {}", e))),
            (Some(text), None) => message_builder
                .body(text)
                .map_err(|e| EmailError::MessageError(format!("Failed to build text message: {}", e))),
            (None, Some(html)) => message_builder
                .singlepart(SinglePart::html(html))
                .map_err(|e| EmailError::MessageError(format!("Failed to build HTML message: {}", e))),
            (None, None) => Err(EmailError::MessageError("No message body provided".to_string())),
        };
    }

    let mut mixed = match (email_message.text_body, email_message.html_body) {
        (Some(text), Some(html)) => MultiPart::mixed().multipart(MultiPart::alternative_plain_html(text, html)),
        (Some(text), None) => MultiPart::mixed().singlepart(SinglePart::plain(text)),
        (None, Some(html)) => MultiPart::mixed().singlepart(SinglePart::html(html)),
        (None, None) => return Err(EmailError::MessageError("No message body provided".to_string())),
    };

    for attachment in email_message.attachments {
        let content_type = ContentType::parse(&attachment.content_type).map_err(|e| {
            EmailError::AttachmentError(format!(
                "Invalid content type '{}' for {}: {}",
                attachment.content_type, attachment.filename, e
            ))
        })?;
        mixed = mixed.singlepart(
            Attachment::new(attachment.filename).body(attachment.content.to_vec(), content_type),
        );
    }

    message_builder
        .multipart(mixed)
        .map_err(|e| EmailError::MessageError(format!("Failed to build message with attachments: {}", e)))
}

/// Validate email address format
pub fn validate_email_address(email: &str) -> Result<(), EmailError> {
    if email.is_empty() {
        return Err(EmailError::AddressError("Email address cannot be empty".to_string()));
    }

    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
        return Err(EmailError::AddressError("Invalid email format".to_string()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attachment(content_type: &str) -> EmailAttachment {
        EmailAttachment {
            filename: "A. Guest - Passport  - scan.pdf".to_string(),
            content: Bytes::from_static(b"%PDF-1.4"),
            content_type: content_type.to_string(),
        }
    }

    #[test]
    fn test_build_message_with_attachments() {
        let config = EmailConfig::from_test_env();
        let message = EmailMessage::new("admin@example.com".to_string(), "Docs".to_string())
            .with_html_body("<p>hello</p>".to_string())
            .with_attachment(attachment("application/pdf"));
        let built = build_message(&config, message).unwrap();
        let raw = String::from_utf8_lossy(&built.formatted()).to_string();
        assert!(raw.contains("multipart/mixed"));
        assert!(raw.contains("application/pdf"));
        assert!(raw.contains("Subject: Docs"));
    }

    #[test]
    fn test_build_message_rejects_bad_attachment_type() {
        let config = EmailConfig::from_test_env();
        let message = EmailMessage::new("admin@example.com".to_string(), "Docs".to_string())
            .with_html_body("<p>hello</p>".to_string())
            .with_attachment(attachment("not a mime"));
        assert!(matches!(build_message(&config, message), Err(EmailError::AttachmentError(_))));
    }

    #[test]
    fn test_build_message_requires_body() {
        let config = EmailConfig::from_test_env();
        let message = EmailMessage::new("admin@example.com".to_string(), "Empty".to_string());
        assert!(matches!(build_message(&config, message), Err(EmailError::MessageError(_))));
    }

    #[test]
    fn test_validate_email_address() {
        assert!(validate_email_address("guest@example.com").is_ok());
        assert!(validate_email_address("").is_err());
        assert!(validate_email_address("guest").is_err());
        assert!(validate_email_address("@example.com").is_err());
        assert!(validate_email_address("a@b@c").is_err());
    }
}
