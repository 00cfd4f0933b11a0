//! Phone number decoding for stored carrier payloads.
//!
//! The carrier SDK writes its phone-number fields either as a bare string
//! (`"+15035551234"`) or as an object (`{"endpoint":"+15035551234"}`), and cannot
//! read the object form back. Anything that is not one of those two shapes holding
//! an E.164 value decodes to `None` instead of failing the whole payload.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::domain::PhoneNumber;

const ENDPOINT_FIELD: &str = "endpoint";

/// `deserialize_with` adapter for carrier phone-number fields.
///
/// Use together with `#[serde(default)]` so a missing field also yields `None`.
pub fn decode_phone_number<'de, D>(deserializer: D) -> Result<Option<PhoneNumber>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(phone_number_from_value(&value))
}

/// Extract an E.164 phone number from a JSON value.
pub fn phone_number_from_value(value: &Value) -> Option<PhoneNumber> {
    tracing::debug!(%value, "decoding carrier phone number");

    let text = match value {
        Value::String(text) => text,
        Value::Object(fields) => match fields.get(ENDPOINT_FIELD) {
            Some(Value::String(text)) => text,
            Some(Value::Null) | None => {
                tracing::warn!(%value, "could not extract phone number value from JSON");
                return None;
            }
            Some(other) => {
                tracing::warn!(value = %other, "unexpected phone number value in JSON");
                return None;
            }
        },
        Value::Null => return None,
        other => {
            tracing::warn!(value = %other, "unexpected phone number value in JSON");
            return None;
        }
    };

    let phone = PhoneNumber::parse(text);
    if phone.is_none() {
        tracing::debug!(text = %text, "phone number is not E.164");
    }
    phone
}
