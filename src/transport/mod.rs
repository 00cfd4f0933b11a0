//! Transport layer: carrier wire-format details (serialization/deserialization).

mod message;
mod phone;

pub use message::{
    CarrierErrorPayload, CarrierMessage, TransportError, decode_error_json_response,
    encode_create_message_form,
};
pub use phone::{decode_phone_number, phone_number_from_value};
