use serde::Deserialize;
use serde::de::Error as DeError;

/// Credit amount returned as either JSON string or JSON number.
///
/// For numbers, the raw JSON token is preserved to avoid formatting drift
/// (`1.00` remains `"1.00"` instead of becoming `"1.0"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportCredits(String);

impl TransportCredits {
    pub fn into_string(self) -> String {
        self.0
    }
}

impl<'de> Deserialize<'de> for TransportCredits {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw: Box<serde_json::value::RawValue> = Deserialize::deserialize(deserializer)?;
        let token = raw.get();

        match token.as_bytes().first().copied() {
            Some(b'"') => {
                let parsed = serde_json::from_str::<String>(token).map_err(D::Error::custom)?;
                Ok(Self(parsed))
            }
            Some(b'-' | b'0'..=b'9') => Ok(Self(token.to_owned())),
            _ => Err(D::Error::custom(
                "expected credits field to be JSON string or number",
            )),
        }
    }
}

/// Identifier returned as either JSON number or JSON string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum TransportId {
    Int(u64),
    String(String),
}

impl TransportId {
    pub fn into_string(self) -> String {
        match self {
            Self::Int(value) => value.to_string(),
            Self::String(value) => value,
        }
    }
}
