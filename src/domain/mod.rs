//! Domain layer: strong types, delivery outcomes and pure policy (no I/O).

pub mod phone;
mod request;
mod result;
pub mod subject;
mod validation;
mod value;

pub use phone::{NanpNumber, PhoneNumber};
pub use request::CreateMessage;
pub use result::{BoxError, DeliveryError, DeliveryResult, UnsuccessfulDelivery};
pub use validation::ValidationError;
pub use value::{
    AccountSid, AuthToken, CallbackUrl, KnownMessageStatus, MessageSid, MessageStatus,
};
