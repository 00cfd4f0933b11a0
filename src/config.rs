//! Messaging configuration and strategy selection.
//!
//! ```toml
//! email-delivery-method = "smtp"
//! sms-delivery-method = "twilio"
//!
//! [email]
//! default-sender-address = "noreply@example.com"
//! subject-prefix = "[DEV]"
//!
//! [twilio]
//! account-sid = "AC..."
//! auth-token = "..."
//! callback-url = "https://example.com/sms/status"
//!
//! [smtp]
//! host = "smtp.example.com"
//! tls = "starttls"
//! ```

use std::sync::Arc;

use serde::Deserialize;

use crate::client::{
    CarrierClient, CarrierError, MailError, MailTransport, SmtpMailer, TwilioClient,
    TwilioCredentials,
};
use crate::domain::{CallbackUrl, ValidationError};
use crate::strategy::{
    CarrierSmsStrategy, EmailDeliveryStrategy, LogEmailStrategy, LogSmsStrategy,
    NoopEmailStrategy, NoopSmsStrategy, SmsDeliveryStrategy, SmtpEmailStrategy,
};

#[derive(Debug, thiserror::Error)]
/// Errors raised while building strategies from configuration.
///
/// These surface at startup; nothing falls back to a different strategy.
pub enum ConfigError {
    /// The configuration file could not be parsed.
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// The `twilio` SMS method was selected without both credentials.
    #[error(
        "twilio account sid and auth token are required for the twilio SMS delivery method"
    )]
    MissingCarrierCredentials,

    /// The `smtp` email method was selected without a mail transport.
    #[error("a mail transport is required for the smtp email delivery method; check the smtp host")]
    MissingMailTransport,

    /// A configured value failed validation.
    #[error("invalid setting: {0}")]
    Invalid(#[from] ValidationError),

    /// The carrier client could not be created.
    #[error("could not create carrier client: {0}")]
    Carrier(#[from] CarrierError),

    /// The mail transport could not be created.
    #[error("could not create mail transport: {0}")]
    Mail(#[from] MailError),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailDeliveryMethod {
    /// Log messages instead of delivering them.
    #[default]
    Log,
    /// Discard messages.
    Noop,
    /// Deliver messages over SMTP.
    Smtp,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SmsDeliveryMethod {
    /// Log messages instead of delivering them.
    #[default]
    Log,
    /// Discard messages.
    Noop,
    /// Deliver messages through the Twilio API.
    Twilio,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
/// Email settings shared by every email strategy.
pub struct EmailSettings {
    pub default_sender_address: Option<String>,
    pub subject_prefix: Option<String>,
}

impl EmailSettings {
    /// Default sender address, if one is configured and not blank.
    pub fn default_sender(&self) -> Option<&str> {
        non_blank(self.default_sender_address.as_deref())
    }

    /// Subject prefix, or an empty string when none is configured.
    pub fn subject_prefix(&self) -> &str {
        self.subject_prefix.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
/// Carrier account settings.
pub struct TwilioSettings {
    pub account_sid: Option<String>,
    pub auth_token: Option<String>,
    /// Public URL the carrier reports message status changes to.
    pub callback_url: Option<String>,
}

impl TwilioSettings {
    /// Both credentials are present and not blank.
    pub fn is_configured(&self) -> bool {
        non_blank(self.account_sid.as_deref()).is_some()
            && non_blank(self.auth_token.as_deref()).is_some()
    }

    pub fn credentials(&self) -> Result<TwilioCredentials, ConfigError> {
        if !self.is_configured() {
            return Err(ConfigError::MissingCarrierCredentials);
        }
        Ok(TwilioCredentials::new(
            self.account_sid.clone().unwrap_or_default(),
            self.auth_token.clone().unwrap_or_default(),
        )?)
    }

    /// Validated callback URL; a blank value means no callback.
    pub fn callback(&self) -> Result<Option<CallbackUrl>, ValidationError> {
        non_blank(self.callback_url.as_deref())
            .map(CallbackUrl::new)
            .transpose()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TlsMode {
    /// Plain connection, no encryption.
    None,
    /// Upgrade with `STARTTLS`.
    #[default]
    StartTls,
    /// Implicit TLS (SMTPS).
    Tls,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SmtpSettings {
    pub host: String,
    pub port: Option<u16>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub tls: TlsMode,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
/// Top-level messaging configuration.
pub struct MessagingConfig {
    /// When `false`, both channels discard every message.
    pub enabled: bool,
    pub email_delivery_method: EmailDeliveryMethod,
    pub sms_delivery_method: SmsDeliveryMethod,
    pub email: EmailSettings,
    pub twilio: TwilioSettings,
    pub smtp: Option<SmtpSettings>,
}

impl Default for MessagingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            email_delivery_method: EmailDeliveryMethod::default(),
            sms_delivery_method: SmsDeliveryMethod::default(),
            email: EmailSettings::default(),
            twilio: TwilioSettings::default(),
            smtp: None,
        }
    }
}

impl MessagingConfig {
    /// Parse configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Build the SMTP mail transport when `smtp` settings with a host are present.
    pub fn mail_transport(&self) -> Result<Option<Arc<dyn MailTransport>>, ConfigError> {
        let Some(settings) = self.smtp.as_ref().filter(|it| !it.host.trim().is_empty()) else {
            return Ok(None);
        };
        let mailer: Arc<dyn MailTransport> = Arc::new(SmtpMailer::from_settings(settings)?);
        Ok(Some(mailer))
    }

    /// Build the Twilio client when both credentials are configured.
    pub fn carrier_client(&self) -> Result<Option<Arc<dyn CarrierClient>>, ConfigError> {
        if !self.twilio.is_configured() {
            return Ok(None);
        }
        let client: Arc<dyn CarrierClient> =
            Arc::new(TwilioClient::new(self.twilio.credentials()?)?);
        Ok(Some(client))
    }

    /// Select the email strategy.
    ///
    /// `transport` is required for the `smtp` method.
    pub fn email_strategy(
        &self,
        transport: Option<Arc<dyn MailTransport>>,
    ) -> Result<Arc<dyn EmailDeliveryStrategy>, ConfigError> {
        let method = self.effective_email_method();
        tracing::debug!(?method, "creating email delivery strategy");

        let strategy: Arc<dyn EmailDeliveryStrategy> = match method {
            EmailDeliveryMethod::Log => Arc::new(LogEmailStrategy::new(self.email.clone())),
            EmailDeliveryMethod::Noop => Arc::new(NoopEmailStrategy),
            EmailDeliveryMethod::Smtp => {
                let transport = transport.ok_or(ConfigError::MissingMailTransport)?;
                Arc::new(SmtpEmailStrategy::new(transport, self.email.clone()))
            }
        };
        Ok(strategy)
    }

    /// Select the SMS strategy.
    ///
    /// `client` is required for the `twilio` method; without one the error reports
    /// the missing credentials.
    pub fn sms_strategy(
        &self,
        client: Option<Arc<dyn CarrierClient>>,
    ) -> Result<Arc<dyn SmsDeliveryStrategy>, ConfigError> {
        let method = self.effective_sms_method();
        tracing::debug!(?method, "creating SMS delivery strategy");

        let strategy: Arc<dyn SmsDeliveryStrategy> = match method {
            SmsDeliveryMethod::Log => Arc::new(LogSmsStrategy),
            SmsDeliveryMethod::Noop => Arc::new(NoopSmsStrategy),
            SmsDeliveryMethod::Twilio => {
                let client = client.ok_or(ConfigError::MissingCarrierCredentials)?;
                let mut strategy = CarrierSmsStrategy::new(client);
                if let Some(url) = self.twilio.callback()? {
                    strategy = strategy.with_status_callback(url);
                }
                Arc::new(strategy)
            }
        };
        Ok(strategy)
    }

    pub(crate) fn effective_email_method(&self) -> EmailDeliveryMethod {
        if self.enabled {
            self.email_delivery_method
        } else {
            EmailDeliveryMethod::Noop
        }
    }

    pub(crate) fn effective_sms_method(&self) -> SmsDeliveryMethod {
        if self.enabled {
            self.sms_delivery_method
        } else {
            SmsDeliveryMethod::Noop
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|it| !it.is_empty())
}
