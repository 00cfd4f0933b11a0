use std::sync::Arc;

use crate::client::{MailMessage, MailTransport};
use crate::config::EmailSettings;
use crate::domain::subject::add_prefix;
use crate::domain::{DeliveryError, DeliveryResult, UnsuccessfulDelivery};

/// Sends email messages.
///
/// Implementations return `Ok(Some(detail))` when the backend reports something
/// worth keeping, and fail only with [`DeliveryError`].
pub trait EmailDeliveryStrategy: Send + Sync {
    /// Send a message from an explicit sender address.
    fn send_email(&self, from: &str, to: &str, subject: &str, body: &str) -> DeliveryResult;

    /// Send a message from the configured default sender address.
    fn send_email_from_default(&self, to: &str, subject: &str, body: &str) -> DeliveryResult;

    /// Whether this strategy discards every message.
    fn is_noop(&self) -> bool {
        false
    }
}

fn default_sender(settings: &EmailSettings) -> Result<&str, DeliveryError> {
    settings
        .default_sender()
        .ok_or(DeliveryError::MissingSenderAddress)
}

#[derive(Debug, Clone, Default)]
/// Writes messages to the log instead of delivering them.
pub struct LogEmailStrategy {
    settings: EmailSettings,
}

impl LogEmailStrategy {
    pub fn new(settings: EmailSettings) -> Self {
        Self { settings }
    }
}

impl EmailDeliveryStrategy for LogEmailStrategy {
    fn send_email(&self, from: &str, to: &str, subject: &str, body: &str) -> DeliveryResult {
        let subject = add_prefix(subject, self.settings.subject_prefix());
        tracing::info!(from, to, subject = %subject, "mock email");
        tracing::info!(body, "mock email text");
        Ok(None)
    }

    fn send_email_from_default(&self, to: &str, subject: &str, body: &str) -> DeliveryResult {
        let from = default_sender(&self.settings)?;
        self.send_email(from, to, subject, body)
    }
}

#[derive(Debug, Clone, Copy, Default)]
/// Discards every message.
pub struct NoopEmailStrategy;

impl EmailDeliveryStrategy for NoopEmailStrategy {
    fn send_email(&self, _from: &str, _to: &str, _subject: &str, _body: &str) -> DeliveryResult {
        Ok(None)
    }

    fn send_email_from_default(&self, _to: &str, _subject: &str, _body: &str) -> DeliveryResult {
        Ok(None)
    }

    fn is_noop(&self) -> bool {
        true
    }
}

/// Delivers plain-text messages through a [`MailTransport`].
///
/// SMTP reports no per-message tracking detail, so success is always `Ok(None)`.
pub struct SmtpEmailStrategy {
    transport: Arc<dyn MailTransport>,
    settings: EmailSettings,
}

impl SmtpEmailStrategy {
    pub fn new(transport: Arc<dyn MailTransport>, settings: EmailSettings) -> Self {
        Self {
            transport,
            settings,
        }
    }
}

impl EmailDeliveryStrategy for SmtpEmailStrategy {
    fn send_email(&self, from: &str, to: &str, subject: &str, body: &str) -> DeliveryResult {
        let subject = add_prefix(subject, self.settings.subject_prefix());
        tracing::debug!(from, to, subject = %subject, "sending SMTP email");

        let message = MailMessage {
            from: from.to_owned(),
            to: to.to_owned(),
            subject,
            body: body.to_owned(),
        };

        self.transport.send(&message).map_err(|err| {
            tracing::warn!(error = %err, to, "SMTP delivery failed");
            UnsuccessfulDelivery::new("SMTP delivery failed").with_source(err)
        })?;

        Ok(None)
    }

    fn send_email_from_default(&self, to: &str, subject: &str, body: &str) -> DeliveryResult {
        let from = default_sender(&self.settings)?;
        self.send_email(from, to, subject, body)
    }
}
