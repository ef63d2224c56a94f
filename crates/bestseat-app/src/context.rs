use std::sync::Arc;

use bestseat_client::Predictor;
use bestseat_types::AppEvent;
use kanal::AsyncSender;
use tokio_util::sync::CancellationToken;

use crate::state::AppState;

/// Shared dependencies of the event handlers and the submission tasks they spawn
#[derive(Clone)]
pub struct AppContext {
    pub state: Arc<AppState>,
    pub event_tx: AsyncSender<AppEvent>,
    pub predictor: Arc<dyn Predictor>,
    /// Parent of every per-submission token, cancelled on shutdown
    pub cancel: CancellationToken,
}

impl AppContext {
    pub fn new(
        state: Arc<AppState>,
        event_tx: AsyncSender<AppEvent>,
        predictor: Arc<dyn Predictor>,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            state,
            event_tx,
            predictor,
            cancel,
        }
    }

    pub async fn send(&self, event: AppEvent) -> anyhow::Result<()> {
        self.event_tx.send(event).await?;
        Ok(())
    }
}
