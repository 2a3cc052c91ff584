use serde::{Deserialize, Serialize};

use super::TransportError;
use super::money::{TransportCredits, TransportId};
use crate::domain::{
    DeliveryStatus, JobSender, Receiver, ReceiverResult, SendJob, SendResponse, SmsId,
};

const CHARSET: &str = "UTF-8";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SendJobJsonBody<'a> {
    charset: &'static str,
    class: &'static str,
    coding: &'static str,
    message: &'a str,
    no_stop_clause: bool,
    priority: &'static str,
    receivers: Vec<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sender: Option<&'a str>,
    sender_for_response: bool,
    validity_period: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    differed_period: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tag: Option<&'a str>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SendJobJsonResponse {
    #[serde(default)]
    ids: Vec<TransportId>,
    #[serde(default)]
    valid_receivers: Vec<String>,
    #[serde(default)]
    invalid_receivers: Vec<String>,
    #[serde(default)]
    total_credits_removed: Option<TransportCredits>,
    #[serde(default)]
    tag: Option<String>,
}

pub fn encode_send_job_body(job: &SendJob) -> Result<String, TransportError> {
    let (sender, sender_for_response) = match job.sender() {
        JobSender::Named(name) => (Some(name.as_str()), false),
        JobSender::ForResponse => (None, true),
    };

    let body = SendJobJsonBody {
        charset: CHARSET,
        class: job.class().as_str(),
        coding: job.coding().as_str(),
        message: job.text().as_str(),
        no_stop_clause: job.no_stop_clause(),
        priority: job.priority().as_str(),
        receivers: job.receivers().iter().map(Receiver::as_str).collect(),
        sender,
        sender_for_response,
        validity_period: job.validity_period().minutes(),
        differed_period: job.differed_period(),
        tag: job.tag().map(|tag| tag.as_str()),
    };

    Ok(serde_json::to_string(&body)?)
}

pub fn decode_send_job_json_response(json: &str) -> Result<SendResponse, TransportError> {
    let parsed: SendJobJsonResponse = serde_json::from_str(json)?;

    let ids = parsed
        .ids
        .into_iter()
        .map(|id| {
            let raw = id.into_string();
            SmsId::new(raw.clone()).map_err(|_| TransportError::InvalidId { value: raw })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let valid_receivers = parsed
        .valid_receivers
        .iter()
        .map(|raw| {
            Receiver::new(raw.as_str()).map_err(|_| TransportError::InvalidReceiver {
                value: raw.clone(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    // Ids are listed in the same order as the accepted receivers.
    let mut results = valid_receivers
        .iter()
        .enumerate()
        .map(|(idx, receiver)| ReceiverResult {
            receiver: receiver.as_str().to_owned(),
            status: DeliveryStatus::Accepted,
            sms_id: ids.get(idx).cloned(),
        })
        .collect::<Vec<_>>();
    results.extend(parsed.invalid_receivers.iter().map(|raw| ReceiverResult {
        receiver: raw.clone(),
        status: DeliveryStatus::Rejected,
        sms_id: None,
    }));

    Ok(SendResponse {
        ids,
        valid_receivers,
        invalid_receivers: parsed.invalid_receivers,
        total_credits_removed: parsed
            .total_credits_removed
            .map(TransportCredits::into_string),
        tag: parsed.tag,
        results,
    })
}
