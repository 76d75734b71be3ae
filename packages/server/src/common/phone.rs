use serde::Serialize;
use std::fmt;

/// A national phone number: exactly 10 ASCII digits, no prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Parse a raw client value. Returns `None` unless it is exactly 10 digits.
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.len() == 10 && raw.bytes().all(|b| b.is_ascii_digit()) {
            Some(Self(raw.to_string()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Full international form used by the SMS gateway (e.g. "+919876543210").
    pub fn to_e164(&self, country_code: &str) -> String {
        format!("{}{}", country_code, self.0)
    }

    pub fn masked(&self) -> String {
        mask_phone(&self.0)
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PhoneNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Mask all but the last four characters (phone numbers in logs, Aadhaar in responses).
pub fn mask_phone(raw: &str) -> String {
    let chars: Vec<char> = raw.chars().collect();
    let visible = chars.len().min(4);
    let hidden = chars.len() - visible;
    let tail: String = chars[hidden..].iter().collect();
    format!("{}{}", "*".repeat(hidden), tail)
}
