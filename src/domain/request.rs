use chrono::{DateTime, Utc};

use crate::domain::validation::ValidationError;
use crate::domain::value::{MessageText, Receiver, SenderName, Tag, ValidityPeriod};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Priority {
    #[default]
    High,
    Medium,
    Low,
    VeryLow,
}

impl Priority {
    /// Wire value of the priority.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
            Self::VeryLow => "veryLow",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// Where the handset stores or shows the message.
pub enum MessageClass {
    /// Shown immediately, not stored.
    Flash,
    #[default]
    PhoneDisplay,
    Sim,
    Toolkit,
}

impl MessageClass {
    /// Wire value of the class.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Flash => "flash",
            Self::PhoneDisplay => "phoneDisplay",
            Self::Sim => "sim",
            Self::Toolkit => "toolkit",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Coding {
    #[default]
    SevenBit,
    EightBit,
}

impl Coding {
    /// Wire value of the coding.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SevenBit => "7bit",
            Self::EightBit => "8bit",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Who a job is sent as.
pub enum JobSender {
    Named(SenderName),
    /// Lets receivers answer; the vendor picks a response-capable number.
    ForResponse,
}

#[derive(Debug, Clone)]
/// Validated payload for creating an outgoing SMS job.
pub struct SendJob {
    sender: JobSender,
    receivers: Vec<Receiver>,
    text: MessageText,
    no_stop_clause: bool,
    priority: Priority,
    class: MessageClass,
    coding: Coding,
    validity_period: ValidityPeriod,
    differed_period: Option<u32>,
    tag: Option<Tag>,
}

#[derive(Debug, Clone, Default)]
pub struct SendJobOptions {
    pub is_marketing: bool,
    pub priority: Priority,
    pub class: MessageClass,
    pub coding: Coding,
    pub validity_period: ValidityPeriod,
    pub delivery_date: Option<DateTime<Utc>>,
    pub tag: Option<Tag>,
}

impl SendJob {
    /// Build a job, resolving the delivery date against `now`.
    ///
    /// The delivery date becomes a whole number of minutes from `now`, rounded up.
    pub fn new(
        sender: JobSender,
        receivers: Vec<Receiver>,
        text: MessageText,
        options: SendJobOptions,
        now: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        if receivers.is_empty() {
            return Err(ValidationError::Empty { field: "Receivers" });
        }

        let differed_period = match options.delivery_date {
            Some(date) => Some(minutes_until(now, date)?),
            None => None,
        };

        Ok(Self {
            sender,
            receivers,
            text,
            no_stop_clause: !options.is_marketing,
            priority: options.priority,
            class: options.class,
            coding: options.coding,
            validity_period: options.validity_period,
            differed_period,
            tag: options.tag,
        })
    }

    /// Who the job is sent as.
    pub fn sender(&self) -> &JobSender {
        &self.sender
    }

    /// Receivers in the order they were added.
    pub fn receivers(&self) -> &[Receiver] {
        &self.receivers
    }

    /// Borrow the message body.
    pub fn text(&self) -> &MessageText {
        &self.text
    }

    /// `true` unless the message is marketing.
    pub fn no_stop_clause(&self) -> bool {
        self.no_stop_clause
    }

    /// Delivery priority.
    pub fn priority(&self) -> Priority {
        self.priority
    }

    /// Message class.
    pub fn class(&self) -> MessageClass {
        self.class
    }

    /// Character coding.
    pub fn coding(&self) -> Coding {
        self.coding
    }

    /// Validity period in minutes.
    pub fn validity_period(&self) -> ValidityPeriod {
        self.validity_period
    }

    /// Minutes to wait before sending, if the job is scheduled.
    pub fn differed_period(&self) -> Option<u32> {
        self.differed_period
    }

    /// Borrow the tag, if any.
    pub fn tag(&self) -> Option<&Tag> {
        self.tag.as_ref()
    }
}

fn minutes_until(now: DateTime<Utc>, date: DateTime<Utc>) -> Result<u32, ValidationError> {
    if date <= now {
        return Err(ValidationError::DateInPast);
    }
    let millis = (date - now).num_milliseconds().max(1);
    let minutes = (millis + 59_999) / 60_000;
    Ok(u32::try_from(minutes).unwrap_or(u32::MAX))
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Registration request for a new sender on the selected account.
pub struct AddSender {
    sender: SenderName,
    reason: String,
    description: String,
}

impl AddSender {
    /// `reason` and `description` are free text reviewed by the vendor and may be empty.
    pub fn new(sender: SenderName, reason: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            sender,
            reason: reason.into(),
            description: description.into(),
        }
    }

    /// Borrow the sender to register.
    pub fn sender(&self) -> &SenderName {
        &self.sender
    }

    /// Borrow the reason given to the vendor.
    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// Borrow the sender description.
    pub fn description(&self) -> &str {
        &self.description
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Filter for listing received messages. Unset fields are not sent.
pub struct IncomingFilter {
    pub created_from: Option<DateTime<Utc>>,
    pub created_to: Option<DateTime<Utc>>,
    pub sender: Option<String>,
    pub tag: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Filter for listing sent messages. Unset fields are not sent.
pub struct OutgoingFilter {
    pub created_from: Option<DateTime<Utc>>,
    pub created_to: Option<DateTime<Utc>>,
    pub sender: Option<String>,
    pub receiver: Option<Receiver>,
    pub tag: Option<String>,
    pub delivery_receipt: Option<i64>,
    pub differed_delivery: Option<i64>,
    pub ptt: Option<i64>,
}
