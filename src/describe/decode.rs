//! Two-stage decoding of model responses.
//!
//! Stage one pulls the payload out of a fenced ```` ```json ```` block in free
//! text; stage two validates it against the expected
//! `{directory_description, files}` shape. A structured model interface can
//! call [`decode_payload`] directly and skip stage one.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

static JSON_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```json\s*(.*?)\s*```").expect("valid json block regex"));

/// Used when a payload omits `directory_description`.
pub const DESCRIPTION_UNAVAILABLE: &str = "Description unavailable";

/// One batch worth of descriptions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BatchPayload {
    #[serde(default)]
    pub directory_description: Option<String>,
    #[serde(default)]
    pub files: BTreeMap<String, String>,
}

impl BatchPayload {
    pub fn directory_description(&self) -> &str {
        self.directory_description.as_deref().unwrap_or(DESCRIPTION_UNAVAILABLE)
    }
}

/// Contents of the first fenced block opened with a `json` marker, trimmed.
pub fn extract_json_block(response: &str) -> Option<&str> {
    JSON_BLOCK.captures(response).and_then(|caps| caps.get(1)).map(|m| m.as_str())
}

/// Parse `payload` and require a JSON object whose fields have the expected types.
pub fn decode_payload(payload: &str) -> Result<BatchPayload, serde_json::Error> {
    let value: Value = serde_json::from_str(payload)?;
    if !value.is_object() {
        return Err(<serde_json::Error as serde::de::Error>::custom("expected a JSON object"));
    }
    serde_json::from_value(value)
}
