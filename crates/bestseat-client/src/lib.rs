mod client;
mod error;

pub use client::PredictionClient;
pub use error::{PredictError, SERVER_ERROR_FALLBACK};

use bestseat_types::Selection;

/// Raw successful response from the prediction endpoint
#[derive(Debug, Clone)]
pub struct PredictionPayload {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

/// Seat prediction provider interface
#[async_trait::async_trait]
pub trait Predictor: Send + Sync {
    /// Request a best-seat image for the selection
    async fn predict(&self, selection: &Selection) -> Result<PredictionPayload, PredictError>;
}
