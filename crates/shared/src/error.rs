use serde::{Deserialize, Serialize};

/// Error body returned by the rides backend on non-2xx responses.
///
/// Every field is optional; backends that answer with an empty or
/// unrelated body decode to `ApiErrorBody::default()`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ApiErrorBody {
    /// Decodes a raw response body, ignoring anything that is not the expected shape.
    pub fn from_bytes(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }

    /// The message, if the backend sent a non-empty one. Whitespace is kept as sent.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref().filter(|message| !message.is_empty())
    }
}
