use thiserror::Error;

/// Failure from the text-generation service
#[derive(Debug, Error)]
pub enum GenerateError {
    /// Request never completed (DNS, TLS, connection reset, timeout)
    #[error("request to Gemini failed: {0}")]
    Http(String),

    /// Non-2xx answer. Auth and quota failures land here.
    #[error("Gemini API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Body was not the expected JSON
    #[error("failed to parse Gemini response: {0}")]
    Parse(String),

    /// Well-formed answer without any text, e.g. blocked by a safety filter
    #[error("Gemini returned no text{}", reason_suffix(.reason))]
    EmptyResponse { reason: Option<String> },
}

fn reason_suffix(reason: &Option<String>) -> String {
    match reason {
        Some(reason) => format!(" ({})", reason),
        None => String::new(),
    }
}

impl From<reqwest::Error> for GenerateError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            Self::Api {
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else {
            Self::Http(err.to_string())
        }
    }
}
