use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

pub const CONFIRMED_STATUS: &str = "confirmed";

/// Booking record as returned by the remote booking store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[serde(deserialize_with = "deserialize_booking_id")]
    pub booking_id: String,
    #[serde(default)]
    pub guest_name: String,
    #[serde(default)]
    pub guest_email: String,
    #[serde(default)]
    pub check_in_date: String,
    #[serde(default)]
    pub check_out_date: Option<String>,
    #[serde(default)]
    pub status: String,
}

impl Booking {
    pub fn is_confirmed(&self) -> bool {
        self.status == CONFIRMED_STATUS
    }

    pub fn check_in_at(&self) -> Option<DateTime<Utc>> {
        parse_stay_date(&self.check_in_date)
    }

    pub fn check_out_at(&self) -> Option<DateTime<Utc>> {
        self.check_out_date.as_deref().and_then(parse_stay_date)
    }
}

/// Body of the store's has-documents endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HasDocumentsResponse {
    #[serde(default, deserialize_with = "deserialize_booking_id")]
    pub booking_id: String,
    #[serde(default)]
    pub has_documents: bool,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawBookingId {
    Text(String),
    Number(serde_json::Number),
}

/// The store emits ids as either JSON strings or numbers.
fn deserialize_booking_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawBookingId::deserialize(deserializer)? {
        RawBookingId::Text(s) => s,
        RawBookingId::Number(n) => n.to_string(),
    })
}

/// Parses a stay date. Plain dates are taken as midnight UTC.
pub fn parse_stay_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.and_utc());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}
