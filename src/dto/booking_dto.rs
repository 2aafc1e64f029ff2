use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct BookingQuery {
    pub id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentsQuery {
    pub booking_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentPresenceDto {
    pub booking_id: String,
    pub has_documents: bool,
    pub message: String,
}

impl DocumentPresenceDto {
    pub fn new(booking_id: String, has_documents: bool) -> Self {
        let message = if has_documents {
            "Documents found for this booking"
        } else {
            "No documents found for this booking"
        };
        DocumentPresenceDto { booking_id, has_documents, message: message.to_string() }
    }
}

/// Outcome of one reminder run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderSummary {
    pub processed: usize,
    pub sent: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReminderRunDto {
    pub success: bool,
    pub message: String,
    #[serde(flatten)]
    pub summary: ReminderSummary,
}
