use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity document kinds accepted on the upload form.
///
/// Values outside the known set are kept verbatim so they can still be shown
/// to the administrator.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DocumentType {
    #[default]
    Passport,
    IdCard,
    ResidencePermit,
    DriversLicense,
    Other(String),
}

impl DocumentType {
    pub fn as_str(&self) -> &str {
        match self {
            DocumentType::Passport => "passport",
            DocumentType::IdCard => "id_card",
            DocumentType::ResidencePermit => "residence_permit",
            DocumentType::DriversLicense => "drivers_license",
            DocumentType::Other(s) => s,
        }
    }

    /// Human-readable name used in emails
    pub fn display_name(&self) -> &str {
        match self {
            DocumentType::Passport => "Passport",
            DocumentType::IdCard => "National ID Card",
            DocumentType::ResidencePermit => "Residence Permit",
            DocumentType::DriversLicense => "Driver's License",
            DocumentType::Other(s) => s,
        }
    }
}

impl From<String> for DocumentType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "passport" => DocumentType::Passport,
            "id_card" => DocumentType::IdCard,
            "residence_permit" => DocumentType::ResidencePermit,
            "drivers_license" => DocumentType::DriversLicense,
            _ => DocumentType::Other(value),
        }
    }
}

impl From<&str> for DocumentType {
    fn from(value: &str) -> Self {
        DocumentType::from(value.to_string())
    }
}

impl From<DocumentType> for String {
    fn from(value: DocumentType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A member of the travelling party as declared by the guest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Traveler {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub document_type: DocumentType,
    #[serde(default)]
    pub document_number: String,
}
