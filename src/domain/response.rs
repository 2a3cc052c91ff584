use crate::domain::value::{Receiver, SmsId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeliveryStatus {
    /// The receiver was accepted and an SMS id was assigned.
    Accepted,
    /// The vendor refused the receiver (unknown number, blacklisted, etc).
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiverResult {
    pub receiver: String,
    pub status: DeliveryStatus,
    pub sms_id: Option<SmsId>,
}

#[derive(Debug, Clone, PartialEq)]
/// Outcome of creating an SMS job.
pub struct SendResponse {
    pub ids: Vec<SmsId>,
    pub valid_receivers: Vec<Receiver>,
    pub invalid_receivers: Vec<String>,
    /// Credits consumed, as returned by the API (number token preserved).
    pub total_credits_removed: Option<String>,
    pub tag: Option<String>,
    /// One entry per receiver; accepted ones first, in the order the API listed them.
    pub results: Vec<ReceiverResult>,
}

impl SendResponse {
    pub fn result_for(&self, receiver: &str) -> Option<&ReceiverResult> {
        self.results.iter().find(|result| result.receiver == receiver)
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Details of a single incoming or outgoing message.
pub struct SmsProperties {
    pub id: SmsId,
    pub creation_datetime: Option<String>,
    pub message: Option<String>,
    pub sender: Option<String>,
    pub receiver: Option<String>,
    pub tag: Option<String>,
    pub credits: Option<String>,
    pub delivery_receipt: Option<i64>,
    pub ptt: Option<i64>,
}
