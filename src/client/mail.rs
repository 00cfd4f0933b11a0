use lettre::message::Mailbox;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};

use crate::config::{SmtpSettings, TlsMode};
use crate::domain::BoxError;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Plain-text email handed to a [`MailTransport`].
pub struct MailMessage {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Delivers a single plain-text email.
pub trait MailTransport: Send + Sync {
    fn send(&self, message: &MailMessage) -> Result<(), MailError>;
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`MailTransport`] implementations.
pub enum MailError {
    /// A sender or recipient address could not be parsed.
    #[error("invalid {field} address: {source}")]
    Address {
        field: &'static str,
        #[source]
        source: lettre::address::AddressError,
    },

    /// The message could not be assembled.
    #[error("could not build message: {0}")]
    Build(#[from] lettre::error::Error),

    /// The SMTP server or connection failed.
    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    /// Failure reported by a custom transport.
    #[error("transport error: {0}")]
    Transport(#[source] BoxError),
}

/// [`MailTransport`] backed by a synchronous `lettre` SMTP connection pool.
pub struct SmtpMailer {
    transport: SmtpTransport,
}

impl SmtpMailer {
    /// Wrap an already configured transport.
    pub fn new(transport: SmtpTransport) -> Self {
        Self { transport }
    }

    /// Build a transport from settings.
    pub fn from_settings(settings: &SmtpSettings) -> Result<Self, MailError> {
        let host = settings.host.trim();
        let mut builder = match settings.tls {
            TlsMode::None => SmtpTransport::builder_dangerous(host),
            TlsMode::StartTls => SmtpTransport::starttls_relay(host)?,
            TlsMode::Tls => SmtpTransport::relay(host)?,
        };
        if let Some(port) = settings.port {
            builder = builder.port(port);
        }
        if let (Some(username), Some(password)) = (&settings.username, &settings.password) {
            builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
        }

        Ok(Self::new(builder.build()))
    }
}

impl MailTransport for SmtpMailer {
    fn send(&self, message: &MailMessage) -> Result<(), MailError> {
        let email = build_message(message)?;
        self.transport.send(&email)?;
        Ok(())
    }
}

fn build_message(message: &MailMessage) -> Result<Message, MailError> {
    let from = parse_mailbox("from", &message.from)?;
    let to = parse_mailbox("to", &message.to)?;

    Ok(Message::builder()
        .from(from)
        .to(to)
        .subject(message.subject.as_str())
        .header(ContentType::TEXT_PLAIN)
        .body(message.body.clone())?)
}

fn parse_mailbox(field: &'static str, value: &str) -> Result<Mailbox, MailError> {
    value
        .trim()
        .parse::<Mailbox>()
        .map_err(|source| MailError::Address { field, source })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message() -> MailMessage {
        MailMessage {
            from: "a@example.com".to_owned(),
            to: "b@example.com".to_owned(),
            subject: "[TEST] Hi".to_owned(),
            body: "Body".to_owned(),
        }
    }

    #[test]
    fn builds_plain_text_message() {
        let email = build_message(&message()).unwrap();
        let formatted = String::from_utf8(email.formatted()).unwrap();
        assert!(formatted.contains("From: a@example.com"));
        assert!(formatted.contains("To: b@example.com"));
        assert!(formatted.contains("Subject: [TEST] Hi"));
        assert!(formatted.contains("Content-Type: text/plain"));
        assert!(formatted.contains("Body"));
    }

    #[test]
    fn invalid_address_names_the_field() {
        let mut bad = message();
        bad.to = "not an address".to_owned();
        let err = build_message(&bad).unwrap_err();
        assert!(matches!(err, MailError::Address { field: "to", .. }));

        let mut bad = message();
        bad.from = String::new();
        let err = build_message(&bad).unwrap_err();
        assert!(matches!(err, MailError::Address { field: "from", .. }));
    }

    #[test]
    fn mailer_builds_from_settings() {
        let settings = SmtpSettings {
            host: "localhost".to_owned(),
            port: Some(2525),
            username: Some("user".to_owned()),
            password: Some("pass".to_owned()),
            tls: TlsMode::None,
        };
        assert!(SmtpMailer::from_settings(&settings).is_ok());
    }
}
