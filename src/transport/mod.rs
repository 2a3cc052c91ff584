//! Transport layer: HTTP and wire-format details (serialization/deserialization).

mod account;
mod job;
mod message;
mod money;

use serde::Deserialize;

pub use account::{
    decode_ignored_json_response, decode_name_list_json_response, encode_add_sender_body,
};
pub use job::{decode_send_job_json_response, encode_send_job_body};
pub use message::{
    decode_id_list_json_response, decode_sms_properties_json_response, encode_incoming_query,
    encode_outgoing_query,
};

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("response contains an invalid SMS id: {value:?}")]
    InvalidId { value: String },

    #[error("response contains an invalid receiver: {value}")]
    InvalidReceiver { value: String },
}

#[derive(Debug, Clone, Deserialize)]
struct ApiErrorJsonBody {
    message: String,
}

/// Extract the `message` field the API puts in error bodies.
pub fn decode_api_error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ApiErrorJsonBody>(body)
        .ok()
        .map(|parsed| parsed.message)
}

/// Decode `GET /auth/time`, a bare unix timestamp.
pub fn decode_server_time_json_response(json: &str) -> Result<i64, TransportError> {
    Ok(serde_json::from_str(json.trim())?)
}
