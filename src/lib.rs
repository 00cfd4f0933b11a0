//! Pluggable email and SMS delivery.
//!
//! Each channel is served by one strategy chosen at startup: log the message,
//! discard it, or deliver it for real (SMTP for email, the Twilio API for SMS).
//! Every send returns a [`DeliveryResult`]: `Ok(Some(detail))` carries the
//! backend's serialized response, failures are [`DeliveryError`]s.
//!
//! The layout mirrors the flow of a message: a domain layer of strong types and
//! pure policy, a transport layer for carrier wire-format quirks, a client layer
//! performing I/O, and the strategies plus [`DeliveryService`] on top.
//!
//! ```rust,no_run
//! use courier::{DeliveryService, MessagingConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = MessagingConfig::from_toml_str(
//!         r#"
//!         sms-delivery-method = "twilio"
//!
//!         [twilio]
//!         account-sid = "AC..."
//!         auth-token = "..."
//!         "#,
//!     )?;
//!     let service = DeliveryService::from_config(&config)?;
//!     let detail = service.send_sms("(503) 555-1234", "503.555.6789", "hello")?;
//!     println!("{detail:?}");
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod config;
pub mod domain;
pub mod service;
pub mod strategy;
mod transport;

pub use client::{
    CarrierClient, CarrierError, MailError, MailMessage, MailTransport, SmtpMailer, TwilioClient,
    TwilioClientBuilder, TwilioCredentials,
};
pub use config::{ConfigError, MessagingConfig};
pub use domain::{
    CallbackUrl, CreateMessage, DeliveryError, DeliveryResult, MessageStatus, PhoneNumber,
    UnsuccessfulDelivery, ValidationError,
};
pub use service::DeliveryService;
pub use strategy::{EmailDeliveryStrategy, SmsDeliveryStrategy};
pub use transport::{
    CarrierErrorPayload, CarrierMessage, TransportError, decode_phone_number,
    phone_number_from_value,
};
