use serde::{Deserialize, Serialize};

use crate::model::document::{FileMetadata, IncomingFile, UploadedDocument};
use crate::model::traveler::Traveler;

/// Raw upload form contents, before any validation
#[derive(Debug, Clone, Default)]
pub struct UploadSubmission {
    /// Secure booking reference as typed in the upload link
    pub reference: Option<String>,
    pub guest_name: Option<String>,
    pub email: Option<String>,
    pub travelers: Vec<Traveler>,
    pub files: Vec<IncomingFile>,
    /// `fileMetadata[N]` entries keyed by their declared file index
    pub metadata: Vec<(usize, FileMetadata)>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFileSummary {
    pub original_name: String,
    pub size: usize,
    #[serde(rename = "type")]
    pub content_type: String,
    pub traveler_name: String,
    pub document_type: String,
    pub document_number: String,
}

impl From<&UploadedDocument> for UploadedFileSummary {
    fn from(doc: &UploadedDocument) -> Self {
        UploadedFileSummary {
            original_name: doc.original_name.clone(),
            size: doc.size,
            content_type: doc.media_type.as_mime().to_string(),
            traveler_name: doc.traveler_name.clone(),
            document_type: doc.document_type.as_str().to_string(),
            document_number: doc.document_number.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponseDto {
    pub success: bool,
    pub message: String,
    pub booking_id: String,
    pub guest_name: String,
    pub files: Vec<UploadedFileSummary>,
    /// Whether the booking store accepted the files
    pub remote_storage: bool,
    pub notification_sent: bool,
    pub travelers: Vec<Traveler>,
}
