//! Lenient field decoders for payloads produced by the legacy web form.
//!
//! The legacy form posts every field as a string (select values included)
//! and legacy listings return numbers for NUMBER columns. These helpers
//! accept either shape.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

use crate::types::DbId;

#[derive(Deserialize)]
#[serde(untagged)]
enum TextOrNumber {
    Int(i64),
    Float(f64),
    Text(String),
}

impl TextOrNumber {
    fn into_text(self) -> String {
        match self {
            Self::Int(n) => n.to_string(),
            Self::Float(n) => n.to_string(),
            Self::Text(s) => s,
        }
    }
}

/// Decode a string field that may arrive as a JSON number.
pub(crate) fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    TextOrNumber::deserialize(deserializer).map(TextOrNumber::into_text)
}

/// Decode an id that may arrive as `"12"` or `12`.
pub(crate) fn id<'de, D>(deserializer: D) -> Result<DbId, D::Error>
where
    D: Deserializer<'de>,
{
    match TextOrNumber::deserialize(deserializer)? {
        TextOrNumber::Int(n) => Ok(n),
        TextOrNumber::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| D::Error::custom(format!("invalid id '{s}'"))),
        TextOrNumber::Float(n) => Err(D::Error::custom(format!("invalid id '{n}'"))),
    }
}

/// Decode a 32-bit integer that may arrive as a string.
pub(crate) fn int32<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = TextOrNumber::deserialize(deserializer)?.into_text();
    raw.trim()
        .parse()
        .map_err(|_| D::Error::custom(format!("invalid integer '{raw}'")))
}

/// Render a positional JSON cell as text. `None` for null or missing cells.
pub(crate) fn cell_text(value: Option<&serde_json::Value>) -> Option<String> {
    match value? {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}
