use std::sync::Arc;

use bestseat_client::Predictor;
use bestseat_types::AppEvent;
use bestseat_ui::ui_loop;
use kanal::{AsyncReceiver, AsyncSender};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::context::AppContext;
use crate::events::event_loop;
use crate::state::AppState;

/// Centralized channel management
pub struct ChannelSet {
    pub app_to_ui: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
    pub ui_to_app: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
}

impl ChannelSet {
    pub fn new() -> Self {
        Self {
            app_to_ui: kanal::bounded_async(256), // catalog listings
            // Unbounded: the UI must never wait on the backend while the
            // backend may be waiting on the UI
            ui_to_app: kanal::unbounded_async(),
        }
    }
}

/// Application controller for task spawning and lifecycle
pub struct AppController {
    channels: ChannelSet,
    state: Arc<AppState>,
    predictor: Arc<dyn Predictor>,
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new(state: Arc<AppState>, predictor: Arc<dyn Predictor>) -> Self {
        Self {
            channels: ChannelSet::new(),
            state,
            predictor,
            cancel_token: CancellationToken::new(),
        }
    }

    /// Sender for events rendered by the UI
    pub fn ui_sender(&self) -> AsyncSender<AppEvent> {
        self.channels.app_to_ui.0.clone()
    }

    pub fn spawn_tasks(&self) -> JoinSet<anyhow::Result<()>> {
        let mut tasks = JoinSet::new();

        let ctx = AppContext::new(
            self.state.clone(),
            self.channels.app_to_ui.0.clone(),
            self.predictor.clone(),
            self.cancel_token.clone(),
        );

        // Event loop
        tasks.spawn(event_loop(ctx, self.channels.ui_to_app.1.clone()));

        // UI loop
        tasks.spawn(ui_loop(
            self.channels.app_to_ui.1.clone(),
            self.channels.ui_to_app.0.clone(),
            self.state.config.clone(),
        ));

        tasks
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}
