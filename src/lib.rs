//! Typed Rust client for the OVH SMS REST API.
//!
//! The crate is split in three layers: a domain layer of validated types, a
//! transport layer for wire-format details, and a client layer performing signed
//! calls. Client-side preconditions fail fast with [`ValidationError`], before any
//! request is made.
//!
//! ```rust,no_run
//! use ovh_sms::SmsApi;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), ovh_sms::SmsError> {
//!     let mut api = SmsApi::new("app_key", "app_secret", "ovh-eu", "consumer_key", None)?;
//!     api.set_account("sms-ab12345-1")?;
//!
//!     let mut message = api.create_message(false);
//!     message.set_sender("ACME")?;
//!     message.add_receiver("+33612345678")?;
//!     message.set_text("hello")?;
//!     let _resp = message.send().await?;
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;

pub use client::{Connection, Message, Method, Sms, SmsApi, SmsApiBuilder, SmsError};
pub use domain::{
    AccountName, Coding, DeliveryStatus, Endpoint, IncomingFilter, MessageClass, MessageText,
    OutgoingFilter, PhoneNumber, Priority, Receiver, ReceiverResult, SendResponse, SenderName,
    SmsId, SmsProperties, SmsType, Tag, ValidationError, ValidityPeriod,
};
