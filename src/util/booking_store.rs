use crate::config::BookingStoreConfig;
use crate::model::booking::{Booking, HasDocumentsResponse};
use crate::model::document::UploadedDocument;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};

const API_KEY_HEADER: &str = "x-api-key";
/// Upstream error bodies are cut to this length before they reach logs or errors.
const MAX_ERROR_BODY_CHARS: usize = 500;

/// Booking store errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum BookingStoreError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Booking API returned status {status}: {body}")]
    UpstreamStatus { status: u16, body: String },

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Booking API rejected the request: {0}")]
    Rejected(String),

    #[error("Invalid booking id: {0:?}")]
    InvalidBookingId(String),
}

/// Remote system of record for bookings and their documents
#[async_trait]
pub trait BookingStore: Send + Sync {
    async fn get_booking(&self, booking_id: &str) -> Result<Booking, BookingStoreError>;
    async fn upcoming_bookings(&self) -> Result<Vec<Booking>, BookingStoreError>;
    async fn has_documents(&self, booking_id: &str) -> Result<bool, BookingStoreError>;
    async fn upload_documents(
        &self,
        booking_id: &str,
        documents: &[UploadedDocument],
    ) -> Result<(), BookingStoreError>;
}

/// Per-file metadata field expected by the store's upload endpoint
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StoredFileInfo<'a> {
    traveler_name: &'a str,
    document_type: &'a str,
    document_number: &'a str,
}

/// HTTP client for the booking store REST API
#[derive(Debug, Clone)]
pub struct HttpBookingStore {
    client: reqwest::Client,
    pub config: BookingStoreConfig,
}

impl HttpBookingStore {
    #[instrument(skip(config), fields(api_url = %config.api_url))]
    pub fn new(config: BookingStoreConfig) -> Result<Self, BookingStoreError> {
        info!("Initializing booking store client");

        config.validate().map_err(|e| {
            error!("Booking store configuration validation failed: {}", e);
            BookingStoreError::Config(e.to_string())
        })?;

        let mut headers = HeaderMap::new();
        let key = HeaderValue::from_str(&config.api_key)
            .map_err(|e| BookingStoreError::Config(format!("invalid API key header: {e}")))?;
        headers.insert(API_KEY_HEADER, key);

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()
            .map_err(|e| {
                error!("Failed to build HTTP client: {}", e);
                BookingStoreError::Config(format!("HTTP client creation failed: {e}"))
            })?;

        info!("Booking store client initialized successfully");
        Ok(Self { client, config })
    }

    fn url(&self, segments: &[&str]) -> Result<reqwest::Url, BookingStoreError> {
        self.config
            .endpoint(segments)
            .map_err(|e| BookingStoreError::Config(e.to_string()))
    }

    /// URL of a per-booking resource; the id always stays one path segment.
    fn booking_url(&self, resource: &str, booking_id: &str) -> Result<reqwest::Url, BookingStoreError> {
        if matches!(booking_id.trim(), "" | "." | "..") {
            warn!(booking_id = %booking_id, "Refusing booking id that is not a path segment");
            return Err(BookingStoreError::InvalidBookingId(booking_id.to_string()));
        }
        self.url(&[resource, booking_id])
    }

    async fn get_json<T: DeserializeOwned>(&self, url: reqwest::Url) -> Result<T, BookingStoreError> {
        debug!("GET {}", url);
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| BookingStoreError::Transport(e.to_string()))?;
        let resp = ensure_success(resp).await?;
        resp.json::<T>()
            .await
            .map_err(|e| BookingStoreError::Decode(e.to_string()))
    }
}

async fn ensure_success(resp: reqwest::Response) -> Result<reqwest::Response, BookingStoreError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body: String = resp
        .text()
        .await
        .unwrap_or_default()
        .chars()
        .take(MAX_ERROR_BODY_CHARS)
        .collect();
    warn!(status = status.as_u16(), "Booking API returned a non-success status");
    Err(BookingStoreError::UpstreamStatus { status: status.as_u16(), body })
}

#[async_trait]
impl BookingStore for HttpBookingStore {
    #[instrument(skip(self))]
    async fn get_booking(&self, booking_id: &str) -> Result<Booking, BookingStoreError> {
        self.get_json(self.booking_url("booking", booking_id)?).await
    }

    #[instrument(skip(self))]
    async fn upcoming_bookings(&self) -> Result<Vec<Booking>, BookingStoreError> {
        let bookings: Vec<Booking> = self.get_json(self.url(&["bookings", "upcoming"])?).await?;
        info!("Fetched {} upcoming bookings", bookings.len());
        Ok(bookings)
    }

    #[instrument(skip(self))]
    async fn has_documents(&self, booking_id: &str) -> Result<bool, BookingStoreError> {
        let resp: HasDocumentsResponse = self
            .get_json(self.booking_url("has-documents", booking_id)?)
            .await?;
        Ok(resp.has_documents)
    }

    #[instrument(skip(self, documents), fields(files = documents.len()))]
    async fn upload_documents(
        &self,
        booking_id: &str,
        documents: &[UploadedDocument],
    ) -> Result<(), BookingStoreError> {
        let mut form = Form::new().text("bookingId", booking_id.to_string());

        for (index, doc) in documents.iter().enumerate() {
            let file_key = format!("file_{}", index);
            let part = Part::bytes(doc.content.to_vec())
                .file_name(doc.original_name.clone())
                .mime_str(doc.media_type.as_mime())
                .map_err(|e| BookingStoreError::Config(format!("invalid media type: {e}")))?;
            let info = serde_json::to_string(&StoredFileInfo {
                traveler_name: &doc.traveler_name,
                document_type: doc.document_type.as_str(),
                document_number: &doc.document_number,
            })
            .map_err(|e| BookingStoreError::Decode(e.to_string()))?;

            form = form
                .part(file_key.clone(), part)
                .text(format!("file_info_{}", file_key), info);
        }

        let url = self.url(&["upload-documents"])?;
        info!("Forwarding {} documents to {}", documents.len(), url);
        let resp = self
            .client
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| BookingStoreError::Transport(e.to_string()))?;
        let resp = ensure_success(resp).await?;

        // A 2xx body may still carry an explicit refusal.
        let body: serde_json::Value = resp.json().await.unwrap_or(serde_json::Value::Null);
        if body.get("success").and_then(|v| v.as_bool()) == Some(false) {
            let message = body
                .get("message")
                .and_then(|v| v.as_str())
                .unwrap_or("upload refused")
                .to_string();
            return Err(BookingStoreError::Rejected(message));
        }

        info!("Booking store accepted the documents");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = BookingStoreConfig {
            api_url: String::new(),
            api_key: "key".to_string(),
            timeout_secs: 5,
        };
        assert!(matches!(HttpBookingStore::new(config), Err(BookingStoreError::Config(_))));
    }

    #[test]
    fn test_new_rejects_unprintable_key() {
        let config = BookingStoreConfig {
            api_url: "http://localhost:1".to_string(),
            api_key: "bad\nkey".to_string(),
            timeout_secs: 5,
        };
        assert!(matches!(HttpBookingStore::new(config), Err(BookingStoreError::Config(_))));
    }

    #[test]
    fn test_stored_file_info_shape() {
        let json = serde_json::to_value(StoredFileInfo {
            traveler_name: "A. Guest",
            document_type: "passport",
            document_number: "X1",
        })
        .unwrap();
        assert_eq!(json["travelerName"], "A. Guest");
        assert_eq!(json["documentType"], "passport");
        assert_eq!(json["documentNumber"], "X1");
    }
}
