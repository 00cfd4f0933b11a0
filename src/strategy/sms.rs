use std::sync::Arc;

use crate::client::{CarrierClient, CarrierError};
use crate::domain::phone::to_e164;
use crate::domain::{
    CallbackUrl, CreateMessage, DeliveryError, DeliveryResult, MessageSid, UnsuccessfulDelivery,
    ValidationError,
};
use crate::strategy::translate::translate_response;

/// Sends SMS messages.
///
/// Implementations fail only with [`DeliveryError`]; carrier and normalization
/// errors are kept as the source of an [`UnsuccessfulDelivery`].
pub trait SmsDeliveryStrategy: Send + Sync {
    fn send_sms(&self, from: &str, to: &str, body: &str) -> DeliveryResult;

    /// Whether this strategy discards every message.
    fn is_noop(&self) -> bool {
        false
    }
}

#[derive(Debug, Clone, Copy, Default)]
/// Writes messages to the log instead of delivering them.
pub struct LogSmsStrategy;

impl SmsDeliveryStrategy for LogSmsStrategy {
    fn send_sms(&self, from: &str, to: &str, body: &str) -> DeliveryResult {
        tracing::info!(from, to, "mock SMS message");
        tracing::info!(body, "mock SMS text");
        Ok(None)
    }
}

#[derive(Debug, Clone, Copy, Default)]
/// Discards every message.
pub struct NoopSmsStrategy;

impl SmsDeliveryStrategy for NoopSmsStrategy {
    fn send_sms(&self, _from: &str, _to: &str, _body: &str) -> DeliveryResult {
        Ok(None)
    }

    fn is_noop(&self) -> bool {
        true
    }
}

/// Delivers messages through a carrier API.
///
/// Numbers are converted to E.164 before the carrier sees them, and the carrier
/// response is returned as JSON detail on success.
#[derive(Clone)]
pub struct CarrierSmsStrategy {
    client: Arc<dyn CarrierClient>,
    status_callback: Option<CallbackUrl>,
}

impl CarrierSmsStrategy {
    pub fn new(client: Arc<dyn CarrierClient>) -> Self {
        Self {
            client,
            status_callback: None,
        }
    }

    /// Ask the carrier to report status changes for every message to `url`.
    pub fn with_status_callback(mut self, url: CallbackUrl) -> Self {
        self.status_callback = Some(url);
        self
    }

    /// Fetch the current state of a sent message and translate it like a send.
    pub fn fetch_status(&self, sid: &str) -> DeliveryResult {
        let sid = MessageSid::new(sid).map_err(|err| {
            UnsuccessfulDelivery::new("Invalid carrier message id").with_source(err)
        })?;
        match self.client.fetch(&sid) {
            Ok(message) => translate_response(self.client.name(), &message),
            Err(err) => Err(unexpected("fetching SMS status", err)),
        }
    }

    fn build_request(
        &self,
        from: &str,
        to: &str,
        body: &str,
    ) -> Result<CreateMessage, ValidationError> {
        let from = to_e164(from)?;
        let to = to_e164(to)?;
        let request = CreateMessage::new(to, from, body);
        Ok(match &self.status_callback {
            Some(url) => request.with_status_callback(url.clone()),
            None => request,
        })
    }
}

impl SmsDeliveryStrategy for CarrierSmsStrategy {
    fn send_sms(&self, from: &str, to: &str, body: &str) -> DeliveryResult {
        let request = self.build_request(from, to, body).map_err(|err| {
            UnsuccessfulDelivery::new("Failed to convert phone number to E.164 format")
                .with_source(err)
        })?;

        tracing::debug!(
            from = %request.from(),
            to = %request.to(),
            carrier = self.client.name(),
            "sending SMS"
        );

        match self.client.create(&request) {
            Ok(message) => translate_response(self.client.name(), &message),
            Err(err) => Err(unexpected("delivering SMS", err)),
        }
    }
}

fn unexpected(action: &str, err: CarrierError) -> DeliveryError {
    let message = format!("Unexpected exception {action}: {}", err.kind());
    tracing::error!(error = %err, "{message}");
    UnsuccessfulDelivery::new(message).with_source(err).into()
}
