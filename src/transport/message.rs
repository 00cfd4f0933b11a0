use serde::{Deserialize, Serialize};

use crate::domain::{CallbackUrl, CreateMessage, MessageStatus, PhoneNumber};
use crate::transport::phone::decode_phone_number;

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Message resource returned by the carrier when a message is created or fetched.
///
/// Only `sid`, `account_sid` and `status` are required; every other field is
/// optional so stored payloads from older SDK versions still load. Phone numbers
/// go through [`decode_phone_number`] and degrade to `None` when unreadable.
pub struct CarrierMessage {
    pub sid: String,
    pub account_sid: String,
    pub status: MessageStatus,
    #[serde(default, deserialize_with = "decode_phone_number")]
    pub from: Option<PhoneNumber>,
    #[serde(default, deserialize_with = "decode_phone_number")]
    pub to: Option<PhoneNumber>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub messaging_service_sid: Option<String>,
    #[serde(default)]
    pub direction: Option<String>,
    #[serde(default)]
    pub num_segments: Option<String>,
    #[serde(default)]
    pub num_media: Option<String>,
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub price_unit: Option<String>,
    #[serde(default)]
    pub error_code: Option<i64>,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub api_version: Option<String>,
    #[serde(default)]
    pub date_created: Option<String>,
    #[serde(default)]
    pub date_sent: Option<String>,
    #[serde(default)]
    pub date_updated: Option<String>,
    #[serde(default)]
    pub uri: Option<String>,
}

impl CarrierMessage {
    /// Load a message from JSON (an API response or a stored audit record).
    pub fn from_json(json: &str) -> Result<Self, TransportError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the message to JSON.
    pub fn to_json(&self) -> Result<String, TransportError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Returns `false` only if the carrier reported a known failure status.
    pub fn is_success_response(&self) -> bool {
        !self.status.is_failure()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
/// Error payload returned by the carrier for rejected requests.
pub struct CarrierErrorPayload {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub more_info: Option<String>,
    #[serde(default)]
    pub status: Option<u16>,
}

pub fn encode_create_message_form(request: &CreateMessage) -> Vec<(String, String)> {
    let mut params = vec![
        (
            CreateMessage::TO_FIELD.to_owned(),
            request.to().as_str().to_owned(),
        ),
        (
            CreateMessage::FROM_FIELD.to_owned(),
            request.from().as_str().to_owned(),
        ),
        (CreateMessage::BODY_FIELD.to_owned(), request.body().to_owned()),
    ];
    if let Some(url) = request.status_callback() {
        params.push((CallbackUrl::FIELD.to_owned(), url.as_str().to_owned()));
    }
    params
}

/// Decode a carrier error payload; `None` when the body is not one.
pub fn decode_error_json_response(json: &str) -> Option<CarrierErrorPayload> {
    let payload = serde_json::from_str::<CarrierErrorPayload>(json).ok()?;
    if payload.code.is_none() && payload.message.is_none() {
        return None;
    }
    Some(payload)
}
