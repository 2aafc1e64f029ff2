use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// Leading digits are the booking id, followed by one or two 8-digit tokens.
const REFERENCE_PATTERN: &str = r"^([0-9]+?)([0-9]{8})([0-9]{8})?$";

fn reference_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(REFERENCE_PATTERN).expect("reference pattern is valid"))
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid booking ID format")]
pub struct InvalidReference;

/// Composite booking reference handed to guests in upload links.
///
/// The suffix tokens are opaque and only checked for shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecureBookingReference {
    pub booking_id: String,
    pub first_token: String,
    pub second_token: Option<String>,
}

impl SecureBookingReference {
    pub fn parse(raw: &str) -> Result<Self, InvalidReference> {
        let caps = reference_regex().captures(raw).ok_or(InvalidReference)?;
        let booking_id = caps.get(1).ok_or(InvalidReference)?.as_str().to_string();
        let first_token = caps.get(2).ok_or(InvalidReference)?.as_str().to_string();
        let second_token = caps.get(3).map(|m| m.as_str().to_string());
        Ok(SecureBookingReference { booking_id, first_token, second_token })
    }
}

impl fmt::Display for SecureBookingReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.booking_id, self.first_token)?;
        if let Some(second) = &self.second_token {
            write!(f, "{}", second)?;
        }
        Ok(())
    }
}
