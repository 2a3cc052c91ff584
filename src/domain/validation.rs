use std::fmt;

/// Client-side precondition failure.
///
/// Every variant renders a fixed, human-readable message so callers can tell the
/// violated rule apart without matching on the variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty { field: &'static str },
    InvalidEndpoint { input: String },
    AccountNotSet,
    SenderIncompatibleWithResponse,
    DateInPast,
    InvalidReceiver { input: String },
    DuplicateReceiver { receiver: String },
    NotSmsApi,
    InvalidSmsType { input: String },
    ValidityPeriodOutOfRange { min: u32, max: u32, actual: u32 },
    TagTooLong { max: usize, actual: usize },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} parameter is empty"),
            Self::InvalidEndpoint { input } => write!(
                f,
                "Endpoint parameter must be a known endpoint name or an absolute URL: {input}"
            ),
            Self::AccountNotSet => f.write_str("Please set account before using this function"),
            Self::SenderIncompatibleWithResponse => {
                f.write_str("Sender is incompatible with message for response")
            }
            Self::DateInPast => f.write_str("Date parameter can't be in the past"),
            Self::InvalidReceiver { .. } => {
                f.write_str("Receiver parameter must be a valid international phone number")
            }
            Self::DuplicateReceiver { .. } => f.write_str(
                "Receiver parameter has already been added to the receivers of this message",
            ),
            Self::NotSmsApi => f.write_str("SmsApi parameter must be a SmsApi object"),
            Self::InvalidSmsType { input } => {
                write!(f, "Type parameter must be incoming or outgoing: {input}")
            }
            Self::ValidityPeriodOutOfRange { min, max, actual } => write!(
                f,
                "Validity period parameter out of range: {actual} (expected {min}..={max})"
            ),
            Self::TagTooLong { max, actual } => {
                write!(f, "Tag parameter is too long: {actual} characters (max {max})")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::ValidationError;

    #[test]
    fn display_messages_match_the_documented_wording() {
        let cases = [
            (
                ValidationError::Empty { field: "Endpoint" },
                "Endpoint parameter is empty",
            ),
            (
                ValidationError::AccountNotSet,
                "Please set account before using this function",
            ),
            (
                ValidationError::SenderIncompatibleWithResponse,
                "Sender is incompatible with message for response",
            ),
            (
                ValidationError::DateInPast,
                "Date parameter can't be in the past",
            ),
            (
                ValidationError::InvalidReceiver {
                    input: "test".to_owned(),
                },
                "Receiver parameter must be a valid international phone number",
            ),
            (
                ValidationError::DuplicateReceiver {
                    receiver: "+33612345678".to_owned(),
                },
                "Receiver parameter has already been added to the receivers of this message",
            ),
            (
                ValidationError::NotSmsApi,
                "SmsApi parameter must be a SmsApi object",
            ),
            (ValidationError::Empty { field: "Id" }, "Id parameter is empty"),
        ];

        for (err, expected) in cases {
            assert_eq!(err.to_string(), expected);
        }
    }

    #[test]
    fn range_errors_report_bounds() {
        let err = ValidationError::ValidityPeriodOutOfRange {
            min: 1,
            max: 2880,
            actual: 0,
        };
        assert_eq!(
            err.to_string(),
            "Validity period parameter out of range: 0 (expected 1..=2880)"
        );

        let err = ValidationError::TagTooLong { max: 20, actual: 21 };
        assert_eq!(
            err.to_string(),
            "Tag parameter is too long: 21 characters (max 20)"
        );
    }
}
