//! Application-facing entry point that owns one strategy per channel.

use std::sync::Arc;

use crate::client::{CarrierClient, MailTransport};
use crate::config::{ConfigError, EmailDeliveryMethod, MessagingConfig, SmsDeliveryMethod};
use crate::domain::DeliveryResult;
use crate::strategy::{EmailDeliveryStrategy, SmsDeliveryStrategy};

/// Sends email and SMS through the strategies selected at startup.
///
/// Cloning is cheap; clones share the same strategies.
#[derive(Clone)]
pub struct DeliveryService {
    email: Arc<dyn EmailDeliveryStrategy>,
    sms: Arc<dyn SmsDeliveryStrategy>,
}

impl DeliveryService {
    pub fn new(email: Arc<dyn EmailDeliveryStrategy>, sms: Arc<dyn SmsDeliveryStrategy>) -> Self {
        Self { email, sms }
    }

    /// Build the service from configuration, creating real SMTP and Twilio
    /// collaborators only for the channels that need them.
    pub fn from_config(config: &MessagingConfig) -> Result<Self, ConfigError> {
        let transport = match config.effective_email_method() {
            EmailDeliveryMethod::Smtp => config.mail_transport()?,
            _ => None,
        };
        let client = match config.effective_sms_method() {
            SmsDeliveryMethod::Twilio => config.carrier_client()?,
            _ => None,
        };
        Self::with_collaborators(config, transport, client)
    }

    /// Build the service from configuration with caller-supplied collaborators.
    pub fn with_collaborators(
        config: &MessagingConfig,
        transport: Option<Arc<dyn MailTransport>>,
        client: Option<Arc<dyn CarrierClient>>,
    ) -> Result<Self, ConfigError> {
        let service = Self::new(config.email_strategy(transport)?, config.sms_strategy(client)?);
        tracing::info!(
            email_enabled = service.is_email_enabled(),
            sms_enabled = service.is_sms_enabled(),
            "delivery service ready"
        );
        Ok(service)
    }

    pub fn is_email_enabled(&self) -> bool {
        !self.email.is_noop()
    }

    pub fn is_sms_enabled(&self) -> bool {
        !self.sms.is_noop()
    }

    /// Send an email; `from: None` uses the configured default sender.
    pub fn send_email(
        &self,
        from: Option<&str>,
        to: &str,
        subject: &str,
        body: &str,
    ) -> DeliveryResult {
        match from {
            Some(from) => self.email.send_email(from, to, subject, body),
            None => self.email.send_email_from_default(to, subject, body),
        }
    }

    pub fn send_sms(&self, from: &str, to: &str, body: &str) -> DeliveryResult {
        self.sms.send_sms(from, to, body)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use crate::client::{CarrierError, MailError, MailMessage};
    use crate::domain::{CreateMessage, DeliveryError, MessageSid};
    use crate::transport::CarrierMessage;

    use super::*;

    #[derive(Default)]
    struct RecordingTransport {
        sent: Mutex<Vec<MailMessage>>,
    }

    impl MailTransport for RecordingTransport {
        fn send(&self, message: &MailMessage) -> Result<(), MailError> {
            self.sent.lock().unwrap().push(message.clone());
            Ok(())
        }
    }

    struct QueuedCarrier;

    impl QueuedCarrier {
        fn message() -> CarrierMessage {
            CarrierMessage::from_json(
                r#"{"sid":"SM1","account_sid":"AC1","status":"queued","to":"+15035556789"}"#,
            )
            .unwrap()
        }
    }

    impl CarrierClient for QueuedCarrier {
        fn name(&self) -> &str {
            "Twilio"
        }

        fn create(&self, _request: &CreateMessage) -> Result<CarrierMessage, CarrierError> {
            Ok(Self::message())
        }

        fn fetch(&self, _sid: &MessageSid) -> Result<CarrierMessage, CarrierError> {
            Ok(Self::message())
        }
    }

    #[test]
    fn default_config_logs_both_channels() {
        let service = DeliveryService::from_config(&MessagingConfig::default()).unwrap();
        assert!(service.is_email_enabled());
        assert!(service.is_sms_enabled());
        assert_eq!(
            service
                .send_email(Some("a@x.com"), "b@x.com", "Hi", "Body")
                .unwrap(),
            None
        );
        assert_eq!(service.send_sms("a", "b", "c").unwrap(), None);
    }

    #[test]
    fn disabled_config_discards_everything() {
        let config = MessagingConfig::from_toml_str(
            r#"
            enabled = false
            email-delivery-method = "smtp"
            sms-delivery-method = "twilio"
            "#,
        )
        .unwrap();
        let service = DeliveryService::from_config(&config).unwrap();
        assert!(!service.is_email_enabled());
        assert!(!service.is_sms_enabled());
        assert_eq!(service.send_email(None, "b@x.com", "Hi", "Body").unwrap(), None);
    }

    #[test]
    fn smtp_without_transport_is_rejected() {
        let config = MessagingConfig::from_toml_str(r#"email-delivery-method = "smtp""#).unwrap();
        assert!(matches!(
            DeliveryService::from_config(&config),
            Err(ConfigError::MissingMailTransport)
        ));
    }

    #[test]
    fn twilio_without_credentials_is_rejected() {
        let config = MessagingConfig::from_toml_str(r#"sms-delivery-method = "twilio""#).unwrap();
        assert!(matches!(
            DeliveryService::from_config(&config),
            Err(ConfigError::MissingCarrierCredentials)
        ));
    }

    #[test]
    fn supplied_collaborators_are_used() {
        let config = MessagingConfig::from_toml_str(
            r#"
            email-delivery-method = "smtp"
            sms-delivery-method = "twilio"

            [email]
            default-sender-address = "d@x.com"
            subject-prefix = "[DEV]"
            "#,
        )
        .unwrap();
        let transport = Arc::new(RecordingTransport::default());
        let mailer: Arc<dyn MailTransport> = transport.clone();
        let carrier: Arc<dyn CarrierClient> = Arc::new(QueuedCarrier);
        let service =
            DeliveryService::with_collaborators(&config, Some(mailer), Some(carrier)).unwrap();

        service.send_email(None, "b@x.com", "Hi", "Body").unwrap();
        let sent = transport.sent.lock().unwrap().clone();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].from, "d@x.com");
        assert_eq!(sent[0].subject, "[DEV] Hi");

        let detail = service
            .send_sms("(503) 555-1234", "503.555.6789", "Hi")
            .unwrap()
            .unwrap();
        assert!(detail.contains("SM1"));
    }

    #[test]
    fn missing_default_sender_surfaces_through_service() {
        let service = DeliveryService::from_config(&MessagingConfig::default()).unwrap();
        assert!(matches!(
            service.send_email(None, "b@x.com", "Hi", "Body"),
            Err(DeliveryError::MissingSenderAddress)
        ));
    }
}
