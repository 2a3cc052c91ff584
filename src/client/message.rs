use chrono::{DateTime, Utc};

use super::{Method, SmsApi, SmsError};
use crate::domain::{
    Coding, JobSender, MessageClass, MessageText, Priority, Receiver, SendJob, SendJobOptions,
    SendResponse, SenderName, Tag, ValidationError, ValidityPeriod,
};

#[derive(Debug, Clone)]
/// Outgoing SMS under construction.
///
/// Created by [`SmsApi::create_message`]. Every setter validates its input, so a
/// `Message` never holds a malformed receiver, a duplicate receiver or a past
/// delivery date. A message created for response never has a sender.
pub struct Message<'a> {
    api: &'a SmsApi,
    for_response: bool,
    sender: Option<SenderName>,
    receivers: Vec<Receiver>,
    text: Option<MessageText>,
    is_marketing: bool,
    priority: Priority,
    class: MessageClass,
    coding: Coding,
    delivery_date: Option<DateTime<Utc>>,
    validity_period: ValidityPeriod,
    tag: Option<Tag>,
}

impl<'a> Message<'a> {
    pub(super) fn new(api: &'a SmsApi, for_response: bool) -> Self {
        Self {
            api,
            for_response,
            sender: None,
            receivers: Vec::new(),
            text: None,
            is_marketing: false,
            priority: Priority::default(),
            class: MessageClass::default(),
            coding: Coding::default(),
            delivery_date: None,
            validity_period: ValidityPeriod::default(),
            tag: None,
        }
    }

    /// The API handle this message was created from.
    pub fn api(&self) -> &'a SmsApi {
        self.api
    }

    /// `true` for messages created with `create_message(true)`.
    pub fn is_response_message(&self) -> bool {
        self.for_response
    }

    /// Borrow the sender, if set.
    pub fn sender(&self) -> Option<&SenderName> {
        self.sender.as_ref()
    }

    /// Set the sender. Always refused on a message for response.
    pub fn set_sender(&mut self, sender: impl Into<String>) -> Result<(), ValidationError> {
        if self.for_response {
            return Err(ValidationError::SenderIncompatibleWithResponse);
        }
        self.sender = Some(SenderName::new(sender)?);
        Ok(())
    }

    /// Receivers in the order they were added.
    pub fn receivers(&self) -> &[Receiver] {
        &self.receivers
    }

    /// Add a receiver in international format (`+33612345678`).
    pub fn add_receiver(&mut self, receiver: impl Into<String>) -> Result<(), ValidationError> {
        self.push_receiver(Receiver::new(receiver)?)
    }

    /// Add an already validated receiver, e.g. one converted from a parsed
    /// [`PhoneNumber`](crate::domain::PhoneNumber).
    pub fn push_receiver(&mut self, receiver: Receiver) -> Result<(), ValidationError> {
        if self.receivers.contains(&receiver) {
            return Err(ValidationError::DuplicateReceiver {
                receiver: receiver.as_str().to_owned(),
            });
        }
        self.receivers.push(receiver);
        Ok(())
    }

    /// Borrow the message body, if set.
    pub fn text(&self) -> Option<&MessageText> {
        self.text.as_ref()
    }

    /// Set the message body. Whitespace-only text is refused.
    pub fn set_text(&mut self, text: impl Into<String>) -> Result<(), ValidationError> {
        self.text = Some(MessageText::new(text)?);
        Ok(())
    }

    /// Scheduled delivery date, if any.
    pub fn delivery_date(&self) -> Option<DateTime<Utc>> {
        self.delivery_date
    }

    /// Schedule the message. The date must be strictly in the future.
    pub fn set_delivery_date(&mut self, date: DateTime<Utc>) -> Result<(), ValidationError> {
        self.set_delivery_date_at(date, Utc::now())
    }

    fn set_delivery_date_at(
        &mut self,
        date: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<(), ValidationError> {
        if date <= now {
            return Err(ValidationError::DateInPast);
        }
        self.delivery_date = Some(date);
        Ok(())
    }

    /// `true` for marketing messages.
    pub fn is_marketing(&self) -> bool {
        self.is_marketing
    }

    /// Marketing messages carry the legal STOP clause.
    pub fn set_is_marketing(&mut self, is_marketing: bool) {
        self.is_marketing = is_marketing;
    }

    /// Delivery priority.
    pub fn priority(&self) -> Priority {
        self.priority
    }

    /// Set the delivery priority.
    pub fn set_priority(&mut self, priority: Priority) {
        self.priority = priority;
    }

    /// Message class.
    pub fn class(&self) -> MessageClass {
        self.class
    }

    /// Set where the handset stores or shows the message.
    pub fn set_class(&mut self, class: MessageClass) {
        self.class = class;
    }

    /// Character coding.
    pub fn coding(&self) -> Coding {
        self.coding
    }

    /// Set the character coding.
    pub fn set_coding(&mut self, coding: Coding) {
        self.coding = coding;
    }

    /// Validity period in minutes.
    pub fn validity_period(&self) -> ValidityPeriod {
        self.validity_period
    }

    /// Set the validity period, `1..=2880` minutes.
    pub fn set_validity_period(&mut self, minutes: u32) -> Result<(), ValidationError> {
        self.validity_period = ValidityPeriod::new(minutes)?;
        Ok(())
    }

    /// Borrow the tag, if set.
    pub fn tag(&self) -> Option<&Tag> {
        self.tag.as_ref()
    }

    /// Set the tag, at most 20 characters.
    pub fn set_tag(&mut self, tag: impl Into<String>) -> Result<(), ValidationError> {
        self.tag = Some(Tag::new(tag)?);
        Ok(())
    }

    /// Create the SMS job on the selected account.
    ///
    /// Errors:
    /// - [`SmsError::Validation`] when the account, text, receivers or sender are missing,
    ///   or when the delivery date has passed in the meantime,
    /// - [`SmsError::Api`] / [`SmsError::HttpStatus`] when the API refuses the job.
    pub async fn send(&self) -> Result<SendResponse, SmsError> {
        let account = self.api.require_account()?;
        let job = self.to_job(Utc::now())?;
        let body = crate::transport::encode_send_job_body(&job)
            .map_err(|err| SmsError::Parse(Box::new(err)))?;

        let path = format!("/sms/{account}/jobs");
        let response = self
            .api
            .connection()
            .call_raw(Method::Post, &path, &[], Some(body))
            .await?;
        let parsed = crate::transport::decode_send_job_json_response(&response)
            .map_err(|err| SmsError::Parse(Box::new(err)))?;

        tracing::debug!(
            %account,
            accepted = parsed.valid_receivers.len(),
            rejected = parsed.invalid_receivers.len(),
            "sms job created"
        );
        Ok(parsed)
    }

    fn to_job(&self, now: DateTime<Utc>) -> Result<SendJob, ValidationError> {
        let text = self.text.clone().ok_or(ValidationError::Empty {
            field: MessageText::PARAMETER,
        })?;
        let sender = if self.for_response {
            JobSender::ForResponse
        } else {
            let name = self.sender.clone().ok_or(ValidationError::Empty {
                field: SenderName::PARAMETER,
            })?;
            JobSender::Named(name)
        };

        SendJob::new(
            sender,
            self.receivers.clone(),
            text,
            SendJobOptions {
                is_marketing: self.is_marketing,
                priority: self.priority,
                class: self.class,
                coding: self.coding,
                validity_period: self.validity_period,
                delivery_date: self.delivery_date,
                tag: self.tag.clone(),
            },
            now,
        )
    }
}
