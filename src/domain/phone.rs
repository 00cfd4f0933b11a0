//! Phone number normalization.
//!
//! Anything that is not already E.164 is assumed to be a ten-digit North American
//! (NANP) number and gets country code `1`. This is deliberately narrow: callers
//! outside North America must hand in E.164 input.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Serialize, Serializer};

use crate::domain::validation::ValidationError;

// `+`, a non-zero leading digit, 2..=15 digits in total.
static E164_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+[1-9][0-9]{1,14}$").expect("E.164 pattern is valid"));

// Area code and central-office code must not start with 0 or 1.
static NANP_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[2-9][0-9]{2}[2-9][0-9]{6}$").expect("NANP pattern is valid")
});

/// Returns `true` if `input` is a phone number in E.164 format.
pub fn is_e164(input: &str) -> bool {
    E164_PATTERN.is_match(input)
}

/// Strip every character that is not an ASCII digit, preserving digit order.
///
/// No length or prefix validation is performed.
pub fn normalize(input: &str) -> String {
    input.chars().filter(char::is_ascii_digit).collect()
}

/// Returns `true` if `digits` (already normalized) is a valid NANP number.
pub fn is_normalized_nanp(digits: &str) -> bool {
    NANP_PATTERN.is_match(digits)
}

/// Returns `true` if `input` is a valid NANP number once non-digits are removed.
pub fn is_nanp(input: &str) -> bool {
    is_normalized_nanp(&normalize(input))
}

/// Convert free-form input into E.164.
///
/// E.164 input is returned untouched; anything else must normalize to a valid
/// ten-digit NANP number, which is then prefixed with `+1`.
pub fn to_e164(input: &str) -> Result<PhoneNumber, ValidationError> {
    if let Some(phone) = PhoneNumber::parse(input) {
        return Ok(phone);
    }

    let nanp = NanpNumber::new(input)?;
    Ok(nanp.into())
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Phone number in E.164 format, the canonical wire format for the carrier.
///
/// Invariant: matches `^\+[1-9]\d{1,14}$`.
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Accept `input` only if it is already E.164.
    pub fn parse(input: &str) -> Option<Self> {
        is_e164(input).then(|| Self(input.to_owned()))
    }

    /// Borrow the E.164 string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for PhoneNumber {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Ten-digit North American number, digits only.
///
/// Invariant: matches `^[2-9]\d{2}[2-9]\d{6}$`.
pub struct NanpNumber(String);

impl NanpNumber {
    /// Normalize `input` and validate it as a NANP number.
    pub fn new(input: &str) -> Result<Self, ValidationError> {
        let digits = normalize(input);
        if !is_normalized_nanp(&digits) {
            return Err(ValidationError::InvalidPhoneNumber {
                input: input.to_owned(),
                normalized: digits,
            });
        }
        Ok(Self(digits))
    }

    /// Borrow the ten digits.
    pub fn digits(&self) -> &str {
        &self.0
    }
}

impl From<NanpNumber> for PhoneNumber {
    fn from(value: NanpNumber) -> Self {
        Self(format!("+1{}", value.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NANP_SAMPLES: &[&str] = &["5035551234", "2125550000", "9999999999", "2002000000"];

    #[test]
    fn e164_accepts_international_numbers() {
        assert!(is_e164("+15035551234"));
        assert!(is_e164("+447911123456"));
        assert!(is_e164("+12"));
        assert!(is_e164("+123456789012345"));
    }

    #[test]
    fn e164_rejects_malformed_numbers() {
        assert!(!is_e164("15035551234"));
        assert!(!is_e164("+05035551234"));
        assert!(!is_e164("+1"));
        assert!(!is_e164("+1234567890123456"));
        assert!(!is_e164("+1 503 555 1234"));
        assert!(!is_e164("+15035551234\n"));
        assert!(!is_e164(""));
    }

    #[test]
    fn normalize_keeps_only_digits_in_order() {
        assert_eq!(normalize("(503) 555-1234"), "5035551234");
        assert_eq!(normalize("503.555.6789"), "5035556789");
        assert_eq!(normalize("+1 (800) FLOWERS 42"), "180042");
        assert_eq!(normalize("no digits"), "");
        assert_eq!(normalize("٣٤٥ 12"), "12");
    }

    #[test]
    fn normalized_nanp_enforces_leading_digits() {
        assert!(is_normalized_nanp("5035551234"));
        assert!(!is_normalized_nanp("1035551234"));
        assert!(!is_normalized_nanp("0035551234"));
        assert!(!is_normalized_nanp("5031551234"));
        assert!(!is_normalized_nanp("5030551234"));
        assert!(!is_normalized_nanp("503555123"));
        assert!(!is_normalized_nanp("15035551234"));
        assert!(!is_normalized_nanp("(503) 555-1234"));
    }

    #[test]
    fn nanp_normalizes_before_checking() {
        assert!(is_nanp("(503) 555-1234"));
        assert!(is_nanp("503.555.1234"));
        assert!(!is_nanp("1-800-555-1234"));
        assert!(!is_nanp("555-1234"));
    }

    #[test]
    fn to_e164_passes_e164_input_through() {
        for input in ["+15035551234", "+447911123456", "+8613800138000"] {
            assert_eq!(to_e164(input).unwrap().as_str(), input);
        }
    }

    #[test]
    fn to_e164_prefixes_formatted_nanp_numbers() {
        for digits in NANP_SAMPLES {
            let (area, rest) = digits.split_at(3);
            let (office, line) = rest.split_at(3);
            let variants = [
                digits.to_string(),
                format!("({area}) {office}-{line}"),
                format!("{area}.{office}.{line}"),
                format!("{area}-{office}-{line}"),
                format!(" {area} {office} {line} "),
            ];
            for variant in variants {
                assert_eq!(
                    to_e164(&variant).unwrap().as_str(),
                    format!("+1{digits}"),
                    "input: {variant}"
                );
            }
        }
    }

    #[test]
    fn to_e164_rejects_non_nanp_numbers() {
        for input in [
            "1-800-555-1234",
            "555-1234",
            "(103) 555-1234",
            "(503) 055-1234",
            "",
            "not a number",
        ] {
            let err = to_e164(input).unwrap_err();
            match err {
                ValidationError::InvalidPhoneNumber {
                    input: original,
                    normalized,
                } => {
                    assert_eq!(original, input);
                    assert_eq!(normalized, normalize(input));
                }
                other => panic!("unexpected error: {other:?}"),
            }
        }
    }

    #[test]
    fn nanp_number_converts_to_e164() {
        let nanp = NanpNumber::new("(503) 555-1234").unwrap();
        assert_eq!(nanp.digits(), "5035551234");
        let phone: PhoneNumber = nanp.into();
        assert_eq!(phone.as_str(), "+15035551234");
        assert_eq!(phone.to_string(), "+15035551234");
    }

    #[test]
    fn phone_number_serializes_as_plain_string() {
        let phone = PhoneNumber::parse("+15035551234").unwrap();
        assert_eq!(
            serde_json::to_string(&phone).unwrap(),
            r#""+15035551234""#
        );
    }
}
