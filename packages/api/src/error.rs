use thiserror::Error;

/// Failure taxonomy for calls made through [`crate::ApiClient`].
#[derive(Debug, Error)]
pub enum ApiError {
    /// Login or registration was rejected. Carries the server-provided
    /// message when one was given, for inline display next to the form.
    #[error("{reason}")]
    Auth { reason: String },

    /// The pipeline observed a 401/403 on an authenticated call. By the
    /// time a caller sees this, the invalidation protocol has already run:
    /// the session is cleared and navigation to the login page is underway.
    #[error("authorization expired (status {status})")]
    Unauthorized { status: u16 },

    /// Any other non-2xx response, passed through untouched for the calling
    /// page to handle locally.
    #[error("request failed with status {status}")]
    Status { status: u16, message: Option<String> },

    /// Network-level failure, after the retry policy was exhausted.
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A 2xx body that does not match the declared response schema.
    #[error("unexpected response shape: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// Whether this error already triggered the clear-and-redirect protocol.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }
}
