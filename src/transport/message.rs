use chrono::{DateTime, SecondsFormat, Utc};
use serde::Deserialize;

use super::TransportError;
use super::money::{TransportCredits, TransportId};
use crate::domain::{IncomingFilter, OutgoingFilter, SmsId, SmsProperties};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SmsPropertiesJsonResponse {
    id: TransportId,
    #[serde(default)]
    creation_datetime: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    sender: Option<String>,
    #[serde(default)]
    receiver: Option<String>,
    #[serde(default)]
    tag: Option<String>,
    #[serde(default)]
    credits: Option<TransportCredits>,
    #[serde(default)]
    delivery_receipt: Option<i64>,
    #[serde(default)]
    ptt: Option<i64>,
}

fn push_datetime(params: &mut Vec<(String, String)>, key: &str, value: Option<DateTime<Utc>>) {
    if let Some(value) = value {
        params.push((
            key.to_owned(),
            value.to_rfc3339_opts(SecondsFormat::Secs, false),
        ));
    }
}

fn push_str(params: &mut Vec<(String, String)>, key: &str, value: Option<&str>) {
    if let Some(value) = value {
        params.push((key.to_owned(), value.to_owned()));
    }
}

fn push_int(params: &mut Vec<(String, String)>, key: &str, value: Option<i64>) {
    if let Some(value) = value {
        params.push((key.to_owned(), value.to_string()));
    }
}

pub fn encode_incoming_query(filter: &IncomingFilter) -> Vec<(String, String)> {
    let mut params = Vec::new();
    push_datetime(&mut params, "creationDatetime.from", filter.created_from);
    push_datetime(&mut params, "creationDatetime.to", filter.created_to);
    push_str(&mut params, "sender", filter.sender.as_deref());
    push_str(&mut params, "tag", filter.tag.as_deref());
    params
}

pub fn encode_outgoing_query(filter: &OutgoingFilter) -> Vec<(String, String)> {
    let mut params = Vec::new();
    push_datetime(&mut params, "creationDatetime.from", filter.created_from);
    push_datetime(&mut params, "creationDatetime.to", filter.created_to);
    push_int(&mut params, "deliveryReceipt", filter.delivery_receipt);
    push_int(&mut params, "differedDelivery", filter.differed_delivery);
    push_int(&mut params, "ptt", filter.ptt);
    push_str(
        &mut params,
        "receiver",
        filter.receiver.as_ref().map(|receiver| receiver.as_str()),
    );
    push_str(&mut params, "sender", filter.sender.as_deref());
    push_str(&mut params, "tag", filter.tag.as_deref());
    params
}

pub fn decode_id_list_json_response(json: &str) -> Result<Vec<SmsId>, TransportError> {
    let parsed: Vec<TransportId> = serde_json::from_str(json)?;
    parsed
        .into_iter()
        .map(|id| {
            let raw = id.into_string();
            SmsId::new(raw.clone()).map_err(|_| TransportError::InvalidId { value: raw })
        })
        .collect()
}

pub fn decode_sms_properties_json_response(json: &str) -> Result<SmsProperties, TransportError> {
    let parsed: SmsPropertiesJsonResponse = serde_json::from_str(json)?;
    let raw_id = parsed.id.into_string();
    let id = SmsId::new(raw_id.clone()).map_err(|_| TransportError::InvalidId { value: raw_id })?;

    Ok(SmsProperties {
        id,
        creation_datetime: parsed.creation_datetime,
        message: parsed.message,
        sender: parsed.sender,
        receiver: parsed.receiver,
        tag: parsed.tag,
        credits: parsed.credits.map(TransportCredits::into_string),
        delivery_receipt: parsed.delivery_receipt,
        ptt: parsed.ptt,
    })
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use crate::domain::Receiver;

    use super::*;

    #[test]
    fn empty_filters_encode_no_params() {
        assert!(encode_incoming_query(&IncomingFilter::default()).is_empty());
        assert!(encode_outgoing_query(&OutgoingFilter::default()).is_empty());
    }

    #[test]
    fn incoming_query_formats_dates_as_rfc3339() {
        let filter = IncomingFilter {
            created_from: Some(Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()),
            sender: Some("+33612345678".to_owned()),
            ..Default::default()
        };

        assert_eq!(
            encode_incoming_query(&filter),
            vec![
                (
                    "creationDatetime.from".to_owned(),
                    "2026-01-01T00:00:00+00:00".to_owned()
                ),
                ("sender".to_owned(), "+33612345678".to_owned()),
            ]
        );
    }

    #[test]
    fn outgoing_query_includes_receiver_and_flags() {
        let filter = OutgoingFilter {
            receiver: Some(Receiver::new("+33612345678").unwrap()),
            delivery_receipt: Some(1),
            tag: Some("promo".to_owned()),
            ..Default::default()
        };

        assert_eq!(
            encode_outgoing_query(&filter),
            vec![
                ("deliveryReceipt".to_owned(), "1".to_owned()),
                ("receiver".to_owned(), "+33612345678".to_owned()),
                ("tag".to_owned(), "promo".to_owned()),
            ]
        );
    }

    #[test]
    fn id_list_accepts_numbers_and_strings() {
        let ids = decode_id_list_json_response(r#"[12, "13"]"#).unwrap();
        assert_eq!(
            ids.iter().map(SmsId::as_str).collect::<Vec<_>>(),
            vec!["12", "13"]
        );

        let err = decode_id_list_json_response(r#"[""]"#).unwrap_err();
        assert!(matches!(err, TransportError::InvalidId { .. }));
    }

    #[test]
    fn properties_decode_outgoing_payload() {
        let json = r#"
        {
          "id": 4242,
          "creationDatetime": "2026-02-03T10:00:00+01:00",
          "message": "hello",
          "sender": "ACME",
          "receiver": "+33612345678",
          "credits": 1,
          "deliveryReceipt": 1,
          "ptt": 1000,
          "differedDelivery": 0
        }
        "#;

        let props = decode_sms_properties_json_response(json).unwrap();
        assert_eq!(props.id.as_str(), "4242");
        assert_eq!(props.message.as_deref(), Some("hello"));
        assert_eq!(props.receiver.as_deref(), Some("+33612345678"));
        assert_eq!(props.credits.as_deref(), Some("1"));
        assert_eq!(props.delivery_receipt, Some(1));
        assert_eq!(props.ptt, Some(1000));
        assert_eq!(props.tag, None);
    }
}
