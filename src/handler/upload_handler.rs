use axum::{extract::{Multipart, State}, response::IntoResponse, Json};
use axum::extract::multipart::{Field, MultipartError};
use bytes::BytesMut;
use std::sync::Arc;
use tracing::{debug, error, info};

use crate::dto::upload_dto::UploadSubmission;
use crate::model::document::{FileMetadata, IncomingFile};
use crate::model::traveler::Traveler;
use crate::service::upload_service::{UploadError, UploadService};
use crate::util::error::HandlerError;

impl From<UploadError> for HandlerError {
    fn from(err: UploadError) -> Self {
        HandlerError::bad_request(err.to_string())
    }
}

fn read_error(what: &str, e: MultipartError) -> HandlerError {
    error!("[upload_documents_handler] Failed to read {}: {}", what, e);
    HandlerError::bad_request(format!("Failed to read {}: {}", what, e))
}

/// Index `N` of a `fileMetadata[N]` field name
fn metadata_index(field_name: &str) -> Option<usize> {
    field_name
        .strip_prefix("fileMetadata[")?
        .strip_suffix(']')?
        .parse()
        .ok()
}

async fn read_file(field: Field<'_>) -> Result<IncomingFile, HandlerError> {
    let filename = field.file_name().map(|s| s.to_string()).unwrap_or_default();
    let content_type = field.content_type().map(|s| s.to_string()).unwrap_or_default();
    let mut buf = BytesMut::new();
    let mut stream = field;
    while let Some(chunk) = stream.chunk().await.map_err(|e| read_error("file chunk", e))? {
        buf.extend_from_slice(&chunk);
    }
    debug!("[upload_documents_handler] Received file: {} ({} bytes)", filename, buf.len());
    Ok(IncomingFile { filename, content_type, content: buf.freeze() })
}

/// Collects the upload form into a submission; unknown fields are ignored.
pub async fn read_submission(multipart: &mut Multipart) -> Result<UploadSubmission, HandlerError> {
    let mut submission = UploadSubmission::default();

    while let Some(field) = multipart.next_field().await.map_err(|e| read_error("next field", e))? {
        let name = field.name().map(|s| s.to_string()).unwrap_or_default();
        debug!("[upload_documents_handler] Processing field: {}", name);

        match name.as_str() {
            "bookingId" => submission.reference = Some(field.text().await.map_err(|e| read_error(&name, e))?),
            "guestName" => submission.guest_name = Some(field.text().await.map_err(|e| read_error(&name, e))?),
            "email" => submission.email = Some(field.text().await.map_err(|e| read_error(&name, e))?),
            "travelers" => {
                let raw = field.text().await.map_err(|e| read_error(&name, e))?;
                if !raw.trim().is_empty() {
                    submission.travelers = serde_json::from_str::<Vec<Traveler>>(&raw).map_err(|e| {
                        error!("[upload_documents_handler] Invalid travelers JSON: {}", e);
                        HandlerError::bad_request(format!("Invalid travelers JSON: {}", e))
                    })?;
                }
            }
            "files" => submission.files.push(read_file(field).await?),
            other => {
                let Some(index) = metadata_index(other) else {
                    debug!("[upload_documents_handler] Ignoring field: {}", other);
                    continue;
                };
                let raw = field.text().await.map_err(|e| read_error(&name, e))?;
                let metadata = serde_json::from_str::<FileMetadata>(&raw).map_err(|e| {
                    error!("[upload_documents_handler] Invalid metadata for file {}: {}", index, e);
                    HandlerError::bad_request(format!("Invalid metadata for file {}: {}", index, e))
                })?;
                submission.metadata.push((index, metadata));
            }
        }
    }

    Ok(submission)
}

pub async fn upload_documents_handler(
    State(service): State<Arc<UploadService>>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, HandlerError> {
    info!("[upload_documents_handler] Handler called");
    let submission = read_submission(&mut multipart).await?;
    let response = service.process(submission).await?;
    Ok(Json(response))
}
