use std::fmt;

use serde::Serialize;

use crate::domain::{DeliveryResult, UnsuccessfulDelivery};
use crate::transport::CarrierMessage;

/// Turn a carrier response into a [`DeliveryResult`].
///
/// Only statuses the carrier documents as failures (`failed`, `undelivered`) fail
/// the delivery; every other status, including unknown ones, is a success. The
/// serialized response is returned as the success detail or attached as the error
/// response of the failure.
pub fn translate_response(carrier: &str, message: &CarrierMessage) -> DeliveryResult {
    let successful = message.is_success_response();
    let api_json = serialize_for_audit(message);

    if !successful {
        tracing::warn!(
            sid = %message.sid,
            status = message.status.as_str(),
            "{carrier} reported a failed delivery"
        );
        return Err(UnsuccessfulDelivery::new(format!("{carrier} delivery failed"))
            .with_error_response(api_json)
            .into());
    }

    Ok(Some(api_json))
}

/// Serialize `value` to JSON for diagnostics, falling back to its `Debug` output.
pub fn serialize_for_audit<T>(value: &T) -> String
where
    T: Serialize + fmt::Debug,
{
    serde_json::to_string(value).unwrap_or_else(|err| {
        tracing::error!(error = %err, "could not convert carrier response to JSON, using debug output");
        format!("{value:?}")
    })
}

#[cfg(test)]
mod tests {
    use serde::Serializer;
    use serde::ser::Error as _;

    use crate::domain::{DeliveryError, KnownMessageStatus, MessageStatus};

    use super::*;

    fn message(status: &str) -> CarrierMessage {
        CarrierMessage::from_json(&format!(
            r#"{{
              "sid": "SM123",
              "account_sid": "AC0123456789abcdef",
              "status": "{status}",
              "from": "+15035551234",
              "to": "+15035556789"
            }}"#
        ))
        .unwrap()
    }

    #[test]
    fn failure_statuses_fail_with_serialized_payload() {
        for status in [KnownMessageStatus::Failed, KnownMessageStatus::Undelivered] {
            let err = translate_response("Twilio", &message(status.as_str())).unwrap_err();
            let DeliveryError::Unsuccessful(failure) = err else {
                panic!("unexpected error: {err:?}");
            };
            assert_eq!(failure.message(), "Twilio delivery failed");
            assert!(failure.error_response().contains("AC0123456789abcdef"));
            assert!(failure.cause().is_none());
        }
    }

    #[test]
    fn other_statuses_succeed_with_serialized_payload() {
        for status in ["queued", "sent", "delivered", "accepted", "brand_new_status"] {
            let detail = translate_response("Twilio", &message(status))
                .unwrap()
                .expect("detail");
            assert!(detail.contains("AC0123456789abcdef"), "{status}");
            assert!(detail.contains(status), "{status}");
        }
    }

    #[test]
    fn detail_reloads_as_carrier_message() {
        let original = message("queued");
        let detail = translate_response("Twilio", &original).unwrap().unwrap();
        let reloaded = CarrierMessage::from_json(&detail).unwrap();
        assert_eq!(reloaded, original);
        assert_eq!(reloaded.status, MessageStatus::new("queued"));
    }

    #[derive(Debug)]
    struct Unserializable;

    impl Serialize for Unserializable {
        fn serialize<S>(&self, _serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            Err(S::Error::custom("boom"))
        }
    }

    #[test]
    fn serialization_failure_falls_back_to_debug_output() {
        assert_eq!(serialize_for_audit(&Unserializable), "Unserializable");
    }
}
