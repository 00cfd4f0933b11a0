//! Delivery strategies: interchangeable email and SMS backends.
//!
//! Every strategy returns a [`DeliveryResult`](crate::domain::DeliveryResult) and
//! holds no per-call state, so one instance is built at startup and shared.

mod email;
mod sms;
mod translate;

pub use email::{EmailDeliveryStrategy, LogEmailStrategy, NoopEmailStrategy, SmtpEmailStrategy};
pub use sms::{CarrierSmsStrategy, LogSmsStrategy, NoopSmsStrategy, SmsDeliveryStrategy};
pub use translate::{serialize_for_audit, translate_response};
