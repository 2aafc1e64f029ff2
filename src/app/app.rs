use axum::{routing::get, Router};
use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

use crate::config::{AppConfig, BookingStoreConfig, CronConfig, EmailConfig, SiteConfig};
use crate::router::booking_router::booking_router;
use crate::router::reminder_router::reminder_router;
use crate::router::upload_router::upload_router;
use crate::service::document_service::DocumentService;
use crate::service::reminder_service::ReminderService;
use crate::service::upload_service::UploadService;
use crate::util::booking_store::{BookingStore, HttpBookingStore};
use crate::util::email::{EmailSender, SmtpEmailService};
use crate::util::notification::NotificationComposer;

pub struct App {
    config: AppConfig,
    router: Router,
    pub upload_service: Arc<UploadService>,
    pub document_service: Arc<DocumentService>,
    pub reminder_service: Arc<ReminderService>,
}

impl App {
    /// Builds every service from the environment.
    pub fn new() -> Result<Self, Box<dyn Error>> {
        let config = AppConfig::from_env();
        let store_config = BookingStoreConfig::from_env()?;
        let email_config = EmailConfig::from_env()?;
        let site_config = SiteConfig::from_env();
        let cron_config = CronConfig::from_env();

        let composer = NotificationComposer::new(site_config, email_config.admin_email.clone());
        let store: Arc<dyn BookingStore> = Arc::new(HttpBookingStore::new(store_config)?);
        let email: Arc<dyn EmailSender> = Arc::new(SmtpEmailService::new(email_config)?);

        Ok(Self::with_services(config, store, email, composer, cron_config))
    }

    /// Wires the services and routes around the given store and mailer.
    pub fn with_services(
        config: AppConfig,
        store: Arc<dyn BookingStore>,
        email: Arc<dyn EmailSender>,
        composer: NotificationComposer,
        cron: CronConfig,
    ) -> Self {
        let upload_service = Arc::new(UploadService::new(store.clone(), email.clone(), composer.clone()));
        let document_service = Arc::new(DocumentService::new(store.clone()));
        let reminder_service = Arc::new(ReminderService::new(store, email, composer));

        let router = Router::new()
            .merge(upload_router(upload_service.clone(), config.max_body_bytes))
            .merge(booking_router(document_service.clone()))
            .merge(reminder_router(reminder_service.clone(), Arc::new(cron)))
            .route("/health", get(|| async { "OK" }));

        App { config, router, upload_service, document_service, reminder_service }
    }

    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub async fn start(self) -> Result<(), Box<dyn Error>> {
        let addr = SocketAddr::new(self.config.host.parse()?, self.config.port);
        info!("🚀 Server running at http://{}", addr);
        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, self.router).await?;
        Ok(())
    }
}
