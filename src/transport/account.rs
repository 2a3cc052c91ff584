use serde::Serialize;

use super::TransportError;
use crate::domain::AddSender;

#[derive(Debug, Serialize)]
struct AddSenderJsonBody<'a> {
    description: &'a str,
    reason: &'a str,
    sender: &'a str,
}

pub fn encode_add_sender_body(request: &AddSender) -> Result<String, TransportError> {
    let body = AddSenderJsonBody {
        description: request.description(),
        reason: request.reason(),
        sender: request.sender().as_str(),
    };
    Ok(serde_json::to_string(&body)?)
}

/// Decode a bare JSON array of names (`GET /sms`, `GET /sms/{account}/senders`).
pub fn decode_name_list_json_response(json: &str) -> Result<Vec<String>, TransportError> {
    Ok(serde_json::from_str(json)?)
}

/// Decode the body of a call whose result is not used (`POST .../senders`, `DELETE ...`).
///
/// The API answers with `null` or an object; anything that is valid JSON is accepted.
pub fn decode_ignored_json_response(json: &str) -> Result<(), TransportError> {
    if json.trim().is_empty() {
        return Ok(());
    }
    serde_json::from_str::<serde::de::IgnoredAny>(json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::domain::SenderName;

    use super::*;

    #[test]
    fn add_sender_body_lists_every_field() {
        let request = AddSender::new(SenderName::new("ACME").unwrap(), "brand", "shop alerts");
        assert_eq!(
            encode_add_sender_body(&request).unwrap(),
            r#"{"description":"shop alerts","reason":"brand","sender":"ACME"}"#
        );
    }

    #[test]
    fn name_list_decodes_arrays() {
        let names = decode_name_list_json_response(r#"["sms-ab1-1", "sms-ab1-2"]"#).unwrap();
        assert_eq!(names, vec!["sms-ab1-1".to_owned(), "sms-ab1-2".to_owned()]);

        assert!(decode_name_list_json_response(r#"{"not": "a list"}"#).is_err());
    }

    #[test]
    fn ignored_response_accepts_null_and_empty() {
        assert!(decode_ignored_json_response("null").is_ok());
        assert!(decode_ignored_json_response("").is_ok());
        assert!(decode_ignored_json_response(r#"{"status": "waitingValidation"}"#).is_ok());
        assert!(decode_ignored_json_response("{ nope").is_err());
    }
}
