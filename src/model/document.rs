use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::model::traveler::DocumentType;

pub const MEGABYTE: usize = 1024 * 1024;
/// Upper bound for a single uploaded file
pub const MAX_FILE_BYTES: usize = 10 * MEGABYTE;
/// Upper bound for all files of one submission
pub const MAX_TOTAL_BYTES: usize = 25 * MEGABYTE;

/// Media types accepted for identity documents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    Jpeg,
    Png,
    Pdf,
}

impl MediaType {
    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime {
            "image/jpeg" => Some(MediaType::Jpeg),
            "image/png" => Some(MediaType::Png),
            "application/pdf" => Some(MediaType::Pdf),
            _ => None,
        }
    }

    pub fn as_mime(&self) -> &'static str {
        match self {
            MediaType::Jpeg => "image/jpeg",
            MediaType::Png => "image/png",
            MediaType::Pdf => "application/pdf",
        }
    }
}

/// A file part exactly as received, before validation
#[derive(Debug, Clone)]
pub struct IncomingFile {
    pub filename: String,
    pub content_type: String,
    pub content: Bytes,
}

impl IncomingFile {
    pub fn size(&self) -> usize {
        self.content.len()
    }
}

/// Per-file metadata sent by the upload form as `fileMetadata[N]`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileMetadata {
    #[serde(default)]
    pub traveler_index: Option<usize>,
    #[serde(default)]
    pub traveler_name: Option<String>,
    #[serde(default)]
    pub document_type: Option<String>,
    #[serde(default)]
    pub document_number: Option<String>,
}

/// A validated file paired with the traveler it belongs to
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub original_name: String,
    pub content: Bytes,
    pub media_type: MediaType,
    pub traveler_name: String,
    pub document_type: DocumentType,
    pub document_number: String,
    pub size: usize,
}

impl UploadedDocument {
    /// Attachment filename shown to the administrator,
    /// e.g. `A. Guest - Passport (X123) - scan.pdf`
    pub fn attachment_name(&self) -> String {
        let number = if self.document_number.is_empty() {
            String::new()
        } else {
            format!("({})", self.document_number)
        };
        format!(
            "{} - {} {} - {}",
            self.traveler_name,
            self.document_type.display_name(),
            number,
            self.original_name
        )
    }
}

/// Formats a byte count the way it appears in notification emails
pub fn format_file_size(bytes: usize) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < MEGABYTE {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / MEGABYTE as f64)
    }
}

/// Megabytes with two decimals, as used in size-limit errors
pub fn megabytes(bytes: usize) -> String {
    format!("{:.2}", bytes as f64 / MEGABYTE as f64)
}
