#![allow(dead_code)]

use async_trait::async_trait;
use axum::{body::Body, http::Request, Router};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use villa_docs_backend::app::app::App;
use villa_docs_backend::config::{AppConfig, CronConfig, SiteConfig};
use villa_docs_backend::config::app_conf::DEFAULT_MAX_BODY_BYTES;
use villa_docs_backend::model::booking::Booking;
use villa_docs_backend::model::document::UploadedDocument;
use villa_docs_backend::util::booking_store::{BookingStore, BookingStoreError};
use villa_docs_backend::util::email::{EmailError, EmailMessage, EmailSender};
use villa_docs_backend::util::notification::NotificationComposer;

pub const CRON_SECRET: &str = "test-cron-secret";
pub const ADMIN_EMAIL: &str = "admin@example.com";

/// In-memory booking store with canned answers
pub struct FakeBookingStore {
    pub booking: Result<Booking, BookingStoreError>,
    pub upcoming: Result<Vec<Booking>, BookingStoreError>,
    /// Presence answers per booking id; unknown ids have no documents
    pub documents: HashMap<String, Result<bool, BookingStoreError>>,
    pub upload_result: Result<(), BookingStoreError>,
    pub uploads: Mutex<Vec<(String, Vec<UploadedDocument>)>>,
    pub calls: AtomicUsize,
}

impl Default for FakeBookingStore {
    fn default() -> Self {
        FakeBookingStore {
            booking: Err(BookingStoreError::UpstreamStatus { status: 404, body: "not found".to_string() }),
            upcoming: Ok(Vec::new()),
            documents: HashMap::new(),
            upload_result: Ok(()),
            uploads: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }
}

impl FakeBookingStore {
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn uploads(&self) -> Vec<(String, Vec<UploadedDocument>)> {
        self.uploads.lock().unwrap().clone()
    }
}

#[async_trait]
impl BookingStore for FakeBookingStore {
    async fn get_booking(&self, _booking_id: &str) -> Result<Booking, BookingStoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.booking.clone()
    }

    async fn upcoming_bookings(&self) -> Result<Vec<Booking>, BookingStoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.upcoming.clone()
    }

    async fn has_documents(&self, booking_id: &str) -> Result<bool, BookingStoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.documents.get(booking_id).cloned().unwrap_or(Ok(false))
    }

    async fn upload_documents(
        &self,
        booking_id: &str,
        documents: &[UploadedDocument],
    ) -> Result<(), BookingStoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.uploads.lock().unwrap().push((booking_id.to_string(), documents.to_vec()));
        self.upload_result.clone()
    }
}

/// Records outgoing mail; sends to addresses in `failing` return an SMTP error
#[derive(Default)]
pub struct FakeEmailSender {
    pub sent: Mutex<Vec<EmailMessage>>,
    pub failing: Vec<String>,
}

impl FakeEmailSender {
    pub fn failing_for(addresses: &[&str]) -> Self {
        FakeEmailSender {
            failing: addresses.iter().map(|a| a.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn sent(&self) -> Vec<EmailMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl EmailSender for FakeEmailSender {
    async fn send_email(&self, message: EmailMessage) -> Result<(), EmailError> {
        if self.failing.contains(&message.to) {
            return Err(EmailError::SmtpError("connection refused".to_string()));
        }
        self.sent.lock().unwrap().push(message);
        Ok(())
    }
}

pub fn composer() -> NotificationComposer {
    NotificationComposer::new(SiteConfig::default(), ADMIN_EMAIL.to_string())
}

pub fn test_app(store: Arc<FakeBookingStore>, email: Arc<FakeEmailSender>) -> Router {
    let config = AppConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        max_body_bytes: DEFAULT_MAX_BODY_BYTES,
    };
    let cron = CronConfig { secret: Some(CRON_SECRET.to_string()) };
    App::with_services(config, store, email, composer(), cron).router()
}

pub fn booking(id: &str, email: &str, check_in: &str, status: &str) -> Booking {
    Booking {
        booking_id: id.to_string(),
        guest_name: "A. Guest".to_string(),
        guest_email: email.to_string(),
        check_in_date: check_in.to_string(),
        check_out_date: None,
        status: status.to_string(),
    }
}

const BOUNDARY: &str = "----villa-docs-test-boundary";

/// Hand-built multipart/form-data body
#[derive(Default)]
pub struct MultipartBody {
    body: Vec<u8>,
}

impl MultipartBody {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.body.extend_from_slice(
            format!("--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n").as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, filename: &str, content_type: &str, content: &[u8]) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(content);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    pub fn into_request(mut self, uri: &str) -> Request<Body> {
        self.body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", format!("multipart/form-data; boundary={BOUNDARY}"))
            .body(Body::from(self.body))
            .unwrap()
    }
}
