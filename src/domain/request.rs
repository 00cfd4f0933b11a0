use crate::domain::phone::PhoneNumber;
use crate::domain::value::CallbackUrl;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Request to create (send) a single SMS message through the carrier.
///
/// Both numbers are already E.164; conversion happens before a request is built.
pub struct CreateMessage {
    to: PhoneNumber,
    from: PhoneNumber,
    body: String,
    status_callback: Option<CallbackUrl>,
}

impl CreateMessage {
    /// Form field name used by the carrier for the recipient (`To`).
    pub const TO_FIELD: &'static str = "To";
    /// Form field name used by the carrier for the sender (`From`).
    pub const FROM_FIELD: &'static str = "From";
    /// Form field name used by the carrier for the message text (`Body`).
    pub const BODY_FIELD: &'static str = "Body";

    /// Create a request without a status callback.
    pub fn new(to: PhoneNumber, from: PhoneNumber, body: impl Into<String>) -> Self {
        Self {
            to,
            from,
            body: body.into(),
            status_callback: None,
        }
    }

    /// Ask the carrier to report status changes to `url`.
    pub fn with_status_callback(mut self, url: CallbackUrl) -> Self {
        self.status_callback = Some(url);
        self
    }

    pub fn to(&self) -> &PhoneNumber {
        &self.to
    }

    pub fn from(&self) -> &PhoneNumber {
        &self.from
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn status_callback(&self) -> Option<&CallbackUrl> {
        self.status_callback.as_ref()
    }
}
