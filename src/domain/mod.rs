//! Domain layer: strong types with validation and invariants (no I/O).

mod request;
mod response;
mod validation;
mod value;

pub use request::{
    AddSender, Coding, IncomingFilter, JobSender, MessageClass, OutgoingFilter, Priority, SendJob,
    SendJobOptions,
};
pub use response::{DeliveryStatus, ReceiverResult, SendResponse, SmsProperties};
pub use validation::ValidationError;
pub use value::{
    AccountName, Endpoint, KNOWN_ENDPOINTS, MessageText, PhoneNumber, Receiver, SenderName, SmsId,
    SmsType, Tag, ValidityPeriod,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_rejects_empty() {
        assert!(matches!(
            Endpoint::new("   "),
            Err(ValidationError::Empty {
                field: Endpoint::PARAMETER
            })
        ));
    }

    #[test]
    fn every_known_endpoint_resolves_to_https() {
        for (name, url) in KNOWN_ENDPOINTS {
            let endpoint = Endpoint::new(*name).unwrap();
            assert_eq!(endpoint.as_str(), *url);
            assert!(endpoint.as_str().starts_with("https://"));
        }
    }

    #[test]
    fn receiver_error_carries_input() {
        let err = Receiver::new("test").unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidReceiver {
                input: "test".to_owned()
            }
        );
    }

    #[test]
    fn add_sender_keeps_free_text() {
        let request = AddSender::new(SenderName::new("ACME").unwrap(), "brand", "");
        assert_eq!(request.sender().as_str(), "ACME");
        assert_eq!(request.reason(), "brand");
        assert_eq!(request.description(), "");
    }
}
