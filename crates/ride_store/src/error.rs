use thiserror::Error;

/// Fallback text stored and shown when a failure carries no backend message.
pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error";

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("server responded with status {status}{}", .message.as_deref().map(|m| format!(": {m}")).unwrap_or_default())]
    Server { status: u16, message: Option<String> },
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("failed to decode response body: {0}")]
    Decode(String),
    #[error("invalid rides endpoint: {0}")]
    InvalidUrl(String),
}

impl ServiceError {
    /// The message supplied by the backend, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ServiceError::Server { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// Text used for failure actions and error notifications.
    pub fn user_message(&self) -> String {
        self.server_message()
            .unwrap_or(UNKNOWN_ERROR_MESSAGE)
            .to_string()
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("ride store is closed")]
    Closed,
}
