use std::sync::Arc;
use tracing::{error, info, instrument, warn};

use crate::dto::upload_dto::{UploadResponseDto, UploadSubmission, UploadedFileSummary};
use crate::model::booking_reference::SecureBookingReference;
use crate::model::document::{
    megabytes, FileMetadata, IncomingFile, MediaType, UploadedDocument, MAX_FILE_BYTES, MAX_TOTAL_BYTES,
};
use crate::model::traveler::{DocumentType, Traveler};
use crate::util::booking_store::BookingStore;
use crate::util::email::EmailSender;
use crate::util::notification::{NotificationComposer, UploadNotification};

pub const UNKNOWN_TRAVELER: &str = "Unknown";

fn mb(bytes: &usize) -> String {
    megabytes(*bytes)
}

/// Reasons an upload is refused before anything leaves the process
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UploadError {
    #[error("Missing booking ID")]
    MissingReference,

    #[error("Invalid booking ID format")]
    InvalidReference,

    #[error("Missing guest name")]
    MissingGuestName,

    #[error("No files provided")]
    NoFiles,

    #[error("Total file size ({}MB) exceeds 25MB limit. Please reduce file sizes or upload fewer files.", mb(.total_bytes))]
    TotalSizeExceeded { total_bytes: usize },

    #[error("File type {content_type} is not supported. Please upload JPG, JPEG, PNG, or PDF files only.")]
    UnsupportedType { filename: String, content_type: String },

    #[error("File {filename} ({}MB) exceeds 10MB limit", mb(.size))]
    FileTooLarge { filename: String, size: usize },
}

/// A submission that passed every check
#[derive(Debug, Clone)]
pub struct ValidatedUpload {
    pub reference: SecureBookingReference,
    pub guest_name: String,
    pub email: Option<String>,
    pub travelers: Vec<Traveler>,
    pub files: Vec<(IncomingFile, MediaType)>,
    pub metadata: Vec<(usize, FileMetadata)>,
}

/// Checks a submission in a fixed order and stops at the first violation.
pub fn validate_submission(submission: UploadSubmission) -> Result<ValidatedUpload, UploadError> {
    let raw_reference = submission
        .reference
        .as_deref()
        .filter(|r| !r.trim().is_empty())
        .ok_or(UploadError::MissingReference)?;
    let reference =
        SecureBookingReference::parse(raw_reference).map_err(|_| UploadError::InvalidReference)?;

    let guest_name = submission
        .guest_name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .ok_or(UploadError::MissingGuestName)?
        .to_string();

    if submission.files.is_empty() {
        return Err(UploadError::NoFiles);
    }

    let total_bytes: usize = submission.files.iter().map(IncomingFile::size).sum();
    if total_bytes > MAX_TOTAL_BYTES {
        return Err(UploadError::TotalSizeExceeded { total_bytes });
    }

    let mut files = Vec::with_capacity(submission.files.len());
    for file in submission.files {
        let media_type = MediaType::from_mime(&file.content_type).ok_or_else(|| {
            UploadError::UnsupportedType {
                filename: file.filename.clone(),
                content_type: file.content_type.clone(),
            }
        })?;
        if file.size() > MAX_FILE_BYTES {
            return Err(UploadError::FileTooLarge { filename: file.filename.clone(), size: file.size() });
        }
        files.push((file, media_type));
    }

    Ok(ValidatedUpload {
        reference,
        guest_name,
        email: submission.email.filter(|e| !e.trim().is_empty()),
        travelers: submission.travelers,
        files,
        metadata: submission.metadata,
    })
}

/// Pairs file `i` with the metadata entry declared for index `i`.
///
/// Files without an entry, or with blank fields, fall back to traveler
/// `"Unknown"`, document type `passport` and an empty document number.
pub fn associate_metadata(
    files: Vec<(IncomingFile, MediaType)>,
    mut metadata: Vec<(usize, FileMetadata)>,
) -> Vec<UploadedDocument> {
    metadata.sort_by_key(|(index, _)| *index);

    files
        .into_iter()
        .enumerate()
        .map(|(i, (file, media_type))| {
            let meta = metadata.iter().find(|(index, _)| *index == i).map(|(_, m)| m);
            let non_blank = |v: Option<&String>| v.filter(|s| !s.trim().is_empty()).cloned();

            let traveler_name = non_blank(meta.and_then(|m| m.traveler_name.as_ref()))
                .unwrap_or_else(|| UNKNOWN_TRAVELER.to_string());
            let document_type = non_blank(meta.and_then(|m| m.document_type.as_ref()))
                .map(DocumentType::from)
                .unwrap_or_default();
            let document_number = meta
                .and_then(|m| m.document_number.clone())
                .unwrap_or_default();

            let size = file.size();
            UploadedDocument {
                original_name: file.filename,
                content: file.content,
                media_type,
                traveler_name,
                document_type,
                document_number,
                size,
            }
        })
        .collect()
}

pub struct UploadService {
    pub store: Arc<dyn BookingStore>,
    pub email: Arc<dyn EmailSender>,
    pub composer: NotificationComposer,
}

impl UploadService {
    pub fn new(
        store: Arc<dyn BookingStore>,
        email: Arc<dyn EmailSender>,
        composer: NotificationComposer,
    ) -> Self {
        Self { store, email, composer }
    }

    /// Validates, then forwards to the booking store and notifies the administrator.
    ///
    /// Forwarding and notification failures are logged and reported in the
    /// response flags; they never fail the request.
    #[instrument(skip(self, submission), fields(files = submission.files.len()))]
    pub async fn process(&self, submission: UploadSubmission) -> Result<UploadResponseDto, UploadError> {
        let validated = validate_submission(submission).map_err(|e| {
            warn!("Upload rejected: {}", e);
            e
        })?;
        let booking_id = validated.reference.booking_id.clone();
        info!(booking_id = %booking_id, "Upload validated with {} files", validated.files.len());

        let documents = associate_metadata(validated.files, validated.metadata);

        let remote_storage = match self.store.upload_documents(&booking_id, &documents).await {
            Ok(()) => true,
            Err(e) => {
                error!(booking_id = %booking_id, "Booking store upload failed: {}", e);
                false
            }
        };

        let notification = self.composer.upload_notification(&UploadNotification {
            booking_id: &booking_id,
            guest_name: &validated.guest_name,
            guest_email: validated.email.as_deref(),
            travelers: &validated.travelers,
            documents: &documents,
        });
        let notification_sent = match self.email.send_email(notification).await {
            Ok(()) => {
                info!(booking_id = %booking_id, "Admin notification email sent");
                true
            }
            Err(e) => {
                error!(booking_id = %booking_id, "Failed to send admin notification email: {}", e);
                false
            }
        };

        Ok(UploadResponseDto {
            success: true,
            message: "Files uploaded successfully".to_string(),
            booking_id,
            guest_name: validated.guest_name,
            files: documents.iter().map(UploadedFileSummary::from).collect(),
            remote_storage,
            notification_sent,
            travelers: validated.travelers,
        })
    }
}
