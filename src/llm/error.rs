use thiserror::Error;

/// Typed error for model requests.
///
/// Callers never propagate these past the smallest unit of work; each one is
/// turned into fallback text by the batch pipeline or the summary generators.
#[derive(Debug, Error)]
pub enum LlmError {
    /// Network-level failure (DNS, connection, timeout)
    #[error("Network error: {0}")]
    Network(String),
    /// The server answered with a non-success HTTP status
    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },
    /// The response body could not be decoded
    #[error("Parse error: {0}")]
    Parse(String),
    /// A prompt template referenced a variable that was not supplied
    #[error("Missing prompt variable: {0}")]
    MissingVariable(String),
}

impl From<reqwest::Error> for LlmError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            LlmError::Parse(e.to_string())
        } else {
            LlmError::Network(e.to_string())
        }
    }
}
