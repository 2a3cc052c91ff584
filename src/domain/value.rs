use std::fmt;

use phonenumber::country;

use crate::domain::validation::ValidationError;

/// Named API endpoints and the base URL each resolves to.
pub const KNOWN_ENDPOINTS: &[(&str, &str)] = &[
    ("ovh-eu", "https://eu.api.ovh.com/1.0"),
    ("ovh-ca", "https://ca.api.ovh.com/1.0"),
    ("ovh-us", "https://api.us.ovhcloud.com/1.0"),
    ("kimsufi-eu", "https://eu.api.kimsufi.com/1.0"),
    ("kimsufi-ca", "https://ca.api.kimsufi.com/1.0"),
    ("soyoustart-eu", "https://eu.api.soyoustart.com/1.0"),
    ("soyoustart-ca", "https://ca.api.soyoustart.com/1.0"),
];

fn non_empty(value: String, parameter: &'static str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field: parameter });
    }
    Ok(trimmed.to_owned())
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Base URL of the API, resolved from a known endpoint name or given verbatim.
///
/// Invariant: an absolute `http`/`https` URL without a trailing slash.
pub struct Endpoint(String);

impl Endpoint {
    /// Parameter name used in error messages.
    pub const PARAMETER: &'static str = "Endpoint";

    /// Resolve `ovh-eu`-style names, or accept an absolute `http(s)` URL.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = non_empty(value.into(), Self::PARAMETER)?;

        if let Some((_, url)) = KNOWN_ENDPOINTS.iter().find(|(name, _)| *name == value) {
            return Ok(Self((*url).to_owned()));
        }

        let parsed = url::Url::parse(&value)
            .map_err(|_| ValidationError::InvalidEndpoint { input: value.clone() })?;
        // Request paths are appended verbatim, so the base must end with its path.
        if !matches!(parsed.scheme(), "http" | "https")
            || parsed.host_str().is_none()
            || parsed.query().is_some()
            || parsed.fragment().is_some()
        {
            return Err(ValidationError::InvalidEndpoint { input: value });
        }

        Ok(Self(value.trim_end_matches('/').to_owned()))
    }

    /// Borrow the base URL.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// SMS service name (`sms-ab12345-1`) selected before account-scoped calls.
///
/// Invariant: non-empty after trimming.
pub struct AccountName(String);

impl AccountName {
    /// Parameter name used in error messages.
    pub const PARAMETER: &'static str = "Account";

    /// Create a validated [`AccountName`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self(non_empty(value.into(), Self::PARAMETER)?))
    }

    /// Borrow the account name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Originating identity of a message: an alphanumeric name or a number.
///
/// Invariant: non-empty after trimming. Whether the sender is allowed is
/// decided server-side.
pub struct SenderName(String);

impl SenderName {
    /// Parameter name used in error messages.
    pub const PARAMETER: &'static str = "Sender";

    /// Create a validated [`SenderName`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self(non_empty(value.into(), Self::PARAMETER)?))
    }

    /// Borrow the sender.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Body of an outgoing message.
///
/// Invariant: non-empty after trimming. The original value (including whitespace) is preserved.
pub struct MessageText(String);

impl MessageText {
    /// Parameter name used in error messages.
    pub const PARAMETER: &'static str = "Message";

    /// Create a validated [`MessageText`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::Empty {
                field: Self::PARAMETER,
            });
        }
        Ok(Self(value))
    }

    /// Borrow the text as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Free-form label attached to outgoing messages for later filtering.
///
/// Invariant: `1..=20` characters after trimming.
pub struct Tag(String);

impl Tag {
    /// Parameter name used in error messages.
    pub const PARAMETER: &'static str = "Tag";
    /// Longest accepted tag, in characters.
    pub const MAX_CHARS: usize = 20;

    /// Create a validated [`Tag`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = non_empty(value.into(), Self::PARAMETER)?;
        let actual = value.chars().count();
        if actual > Self::MAX_CHARS {
            return Err(ValidationError::TagTooLong {
                max: Self::MAX_CHARS,
                actual,
            });
        }
        Ok(Self(value))
    }

    /// Borrow the validated tag.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Identifier of an incoming, outgoing or planned message.
///
/// Invariant: non-empty after trimming.
pub struct SmsId(String);

impl SmsId {
    /// Parameter name used in error messages.
    pub const PARAMETER: &'static str = "Id";

    /// Create a validated [`SmsId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self(non_empty(value.into(), Self::PARAMETER)?))
    }

    /// Borrow the validated id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SmsId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Direction of an existing message.
pub enum SmsType {
    Incoming,
    Outgoing,
}

impl SmsType {
    /// Parameter name used in error messages.
    pub const PARAMETER: &'static str = "Type";

    /// Parse `incoming` / `outgoing` (case-insensitive, surrounding whitespace ignored).
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty {
                field: Self::PARAMETER,
            });
        }
        match trimmed.to_ascii_lowercase().as_str() {
            "incoming" => Ok(Self::Incoming),
            "outgoing" => Ok(Self::Outgoing),
            _ => Err(ValidationError::InvalidSmsType {
                input: trimmed.to_owned(),
            }),
        }
    }

    /// Path segment used by the API (`incoming` / `outgoing`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Incoming => "incoming",
            Self::Outgoing => "outgoing",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Destination phone number in international format.
///
/// Invariant: a leading `+` followed by one or more ASCII digits, nothing else.
pub struct Receiver(String);

impl Receiver {
    /// Create a validated [`Receiver`]. The input is checked as given, whitespace included.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let valid = value
            .strip_prefix('+')
            .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()));
        if !valid {
            return Err(ValidationError::InvalidReceiver { input: value });
        }
        Ok(Self(value))
    }

    /// Borrow the number in `+digits` form.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<PhoneNumber> for Receiver {
    fn from(value: PhoneNumber) -> Self {
        // E.164 always satisfies the receiver shape.
        Self(value.e164)
    }
}

impl fmt::Display for Receiver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone)]
/// Parsed phone number with an E.164 representation.
///
/// Use this to turn national-format input into a [`Receiver`]. Equality, ordering,
/// and hashing are based on the E.164 form.
pub struct PhoneNumber {
    raw: String,
    e164: String,
    parsed: phonenumber::PhoneNumber,
}

impl PhoneNumber {
    /// Parse and normalize a phone number into E.164.
    ///
    /// `default_region` is used when the input does not contain an explicit country prefix.
    pub fn parse(
        default_region: Option<country::Id>,
        input: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let input = input.into();
        let raw = input.trim().to_owned();

        let parsed = phonenumber::parse(default_region, &raw)
            .map_err(|_| ValidationError::InvalidReceiver { input: raw.clone() })?;

        let e164 = phonenumber::format(&parsed)
            .mode(phonenumber::Mode::E164)
            .to_string();

        Ok(Self { raw, e164, parsed })
    }

    /// Raw input after trimming.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Normalized E.164 representation.
    pub fn e164(&self) -> &str {
        &self.e164
    }

    /// The parsed phone number from the `phonenumber` crate.
    pub fn parsed(&self) -> &phonenumber::PhoneNumber {
        &self.parsed
    }
}

impl PartialEq for PhoneNumber {
    fn eq(&self, other: &Self) -> bool {
        self.e164 == other.e164
    }
}

impl Eq for PhoneNumber {}

impl std::hash::Hash for PhoneNumber {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.e164.hash(state);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// How long the operator keeps retrying delivery, in minutes.
///
/// Invariant: `1..=2880`.
pub struct ValidityPeriod(u32);

impl ValidityPeriod {
    pub const MIN: u32 = 1;
    pub const MAX: u32 = 2880;

    /// Create a validated [`ValidityPeriod`].
    pub fn new(minutes: u32) -> Result<Self, ValidationError> {
        if !(Self::MIN..=Self::MAX).contains(&minutes) {
            return Err(ValidationError::ValidityPeriodOutOfRange {
                min: Self::MIN,
                max: Self::MAX,
                actual: minutes,
            });
        }
        Ok(Self(minutes))
    }

    /// Period in minutes.
    pub fn minutes(self) -> u32 {
        self.0
    }
}

impl Default for ValidityPeriod {
    fn default() -> Self {
        Self(Self::MAX)
    }
}
