use std::error::Error as StdError;

/// Boxed error preserved as the cause of a failed delivery.
pub type BoxError = Box<dyn StdError + Send + Sync>;

/// Outcome of every delivery strategy.
///
/// `Ok(Some(detail))` carries transport-specific diagnostics (e.g. the serialized
/// carrier response); `Ok(None)` is a success with nothing to report.
pub type DeliveryResult = Result<Option<String>, DeliveryError>;

#[derive(Debug, thiserror::Error)]
/// Errors returned across the strategy boundary.
///
/// Transport-native errors never escape a strategy directly; they are wrapped in
/// [`UnsuccessfulDelivery`] with the original kept as the source.
pub enum DeliveryError {
    /// No explicit sender and no configured default sender address.
    #[error("the default sender address is required to send email without a from address")]
    MissingSenderAddress,

    /// The message could not be delivered.
    #[error(transparent)]
    Unsuccessful(#[from] UnsuccessfulDelivery),
}

impl DeliveryError {
    /// Borrow the delivery failure, if this is one.
    pub fn as_unsuccessful(&self) -> Option<&UnsuccessfulDelivery> {
        match self {
            Self::Unsuccessful(failure) => Some(failure),
            Self::MissingSenderAddress => None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("{message}")]
/// Uniform terminal delivery failure.
pub struct UnsuccessfulDelivery {
    message: String,
    #[source]
    source: Option<BoxError>,
    error_response: Option<String>,
}

impl UnsuccessfulDelivery {
    /// Failure with a human-readable message only.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
            error_response: None,
        }
    }

    /// Attach the underlying cause.
    pub fn with_source(mut self, source: impl Into<BoxError>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Attach the transport-specific error response (e.g. an API payload).
    pub fn with_error_response(mut self, error_response: impl Into<String>) -> Self {
        self.error_response = Some(error_response.into());
        self
    }

    /// Human-readable failure message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Transport-specific error response, falling back to the message.
    pub fn error_response(&self) -> &str {
        self.error_response.as_deref().unwrap_or(&self.message)
    }

    /// Underlying cause, if any.
    pub fn cause(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        self.source.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;
    use std::io;

    use super::*;

    #[test]
    fn error_response_falls_back_to_message() {
        let failure = UnsuccessfulDelivery::new("SMTP delivery failed");
        assert_eq!(failure.error_response(), "SMTP delivery failed");

        let failure = failure.with_error_response(r#"{"status":"failed"}"#);
        assert_eq!(failure.error_response(), r#"{"status":"failed"}"#);
        assert_eq!(failure.message(), "SMTP delivery failed");
    }

    #[test]
    fn source_is_preserved_through_delivery_error() {
        let cause = io::Error::new(io::ErrorKind::ConnectionRefused, "refused");
        let err: DeliveryError = UnsuccessfulDelivery::new("SMTP delivery failed")
            .with_source(cause)
            .into();

        assert_eq!(err.to_string(), "SMTP delivery failed");
        let source = err.source().expect("source");
        let io_err = source.downcast_ref::<io::Error>().expect("io error");
        assert_eq!(io_err.kind(), io::ErrorKind::ConnectionRefused);

        let failure = err.as_unsuccessful().unwrap();
        assert!(failure.cause().is_some());
    }

    #[test]
    fn missing_sender_message_mentions_default_sender() {
        let err = DeliveryError::MissingSenderAddress;
        assert!(err.to_string().contains("default sender address is required"));
        assert!(err.as_unsuccessful().is_none());
    }
}
