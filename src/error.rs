use serde_json::Value;

/// Failures surfaced by the embedding API client.
///
/// Each variant is a distinct failure cause: the request never completed,
/// the backend rejected it, or the backend answered with a body we could
/// not decode.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Transport-level failure: DNS, connection refused, interrupted body read.
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The backend answered with a non-success HTTP status.
    ///
    /// `detail` is the `detail` field of the error body when the body parsed
    /// as JSON and carried one. A `None` means the error body was unparsable
    /// or had no `detail` field, so the backend gave us nothing to relay.
    #[error("backend returned status {status}: {}", detail_text(.detail))]
    Api { status: u16, detail: Option<Value> },

    /// A success-status response whose body did not decode as the documented shape.
    #[error("failed to decode response body: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ClientError {
    /// The HTTP status of an `Api` error.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The backend's `detail` message, when it was a plain string.
    pub fn detail_str(&self) -> Option<&str> {
        match self {
            ClientError::Api {
                detail: Some(Value::String(s)),
                ..
            } => Some(s),
            _ => None,
        }
    }
}

fn detail_text(detail: &Option<Value>) -> String {
    match detail {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => "no detail".into(),
    }
}
