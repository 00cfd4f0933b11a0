use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty { field: &'static str },
    InvalidPhoneNumber { input: String, normalized: String },
    InvalidCallbackUrl { value: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::InvalidPhoneNumber { input, normalized } => write!(
                f,
                "{input} ({normalized}) is not a valid North American phone number"
            ),
            Self::InvalidCallbackUrl { value } => write!(f, "invalid callback url: {value}"),
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::ValidationError;

    #[test]
    fn display_messages_are_human_readable() {
        let err = ValidationError::Empty {
            field: "account_sid",
        };
        assert_eq!(err.to_string(), "account_sid must not be empty");

        let err = ValidationError::InvalidPhoneNumber {
            input: "1-800-555-1234".to_owned(),
            normalized: "18005551234".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "1-800-555-1234 (18005551234) is not a valid North American phone number"
        );

        let err = ValidationError::InvalidCallbackUrl {
            value: "bad".to_owned(),
        };
        assert_eq!(err.to_string(), "invalid callback url: bad");
    }
}
