use std::time::Duration;

/// Message shown when the backend fails without a body
pub const SERVER_ERROR_FALLBACK: &str = "Server error";

#[derive(Debug, thiserror::Error)]
pub enum PredictError {
    /// Backend answered with a non-success status
    #[error("{message}")]
    Request { status: u16, message: String },

    #[error("{0}")]
    Transport(reqwest::Error),

    #[error("Request timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("Request cancelled")]
    Cancelled,
}

impl PredictError {
    pub(crate) fn request(status: u16, body: String) -> Self {
        let message = if body.is_empty() {
            SERVER_ERROR_FALLBACK.to_string()
        } else {
            body
        };

        PredictError::Request { status, message }
    }

    pub(crate) fn transport(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            PredictError::Timeout(timeout)
        } else {
            PredictError::Transport(err)
        }
    }

    /// Text displayed in place of the image
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}
