use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use bestseat_client::{PredictError, PredictionPayload, Predictor};
use bestseat_config::Config;
use bestseat_types::{AppEvent, Selection};
use kanal::AsyncReceiver;
use tempfile::TempDir;
use tokio::sync::Notify;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;

use crate::context::AppContext;
use crate::state::AppState;

pub const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDRseat";

pub enum Reply {
    Image(&'static [u8]),
    Fail(&'static str),
    Hang,
}

/// Predictor double that records every request
pub struct FakePredictor {
    reply: Reply,
    gate: Option<Arc<Notify>>,
    calls: AtomicUsize,
    seen: Mutex<Vec<Selection>>,
}

impl FakePredictor {
    pub fn new(reply: Reply) -> Self {
        Self {
            reply,
            gate: None,
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        }
    }

    /// Hold every response until the gate is notified
    pub fn gated(reply: Reply, gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::new(reply)
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn seen(&self) -> Vec<Selection> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl Predictor for FakePredictor {
    async fn predict(&self, selection: &Selection) -> Result<PredictionPayload, PredictError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(selection.clone());

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        match self.reply {
            Reply::Image(bytes) => Ok(PredictionPayload {
                bytes: bytes.to_vec(),
                content_type: Some("image/png".to_string()),
            }),
            Reply::Fail(message) => Err(PredictError::Request {
                status: 400,
                message: message.to_string(),
            }),
            Reply::Hang => std::future::pending().await,
        }
    }
}

pub struct Harness {
    pub ctx: AppContext,
    pub rx: AsyncReceiver<AppEvent>,
    pub predictor: Arc<FakePredictor>,
    pub _dir: TempDir,
}

pub fn test_config(dir: &TempDir) -> Config {
    let mut config = Config::default();
    config.ui.output_dir = dir.path().join("images");
    config.network.timeout_seconds = 5;
    config
}

pub fn harness(predictor: FakePredictor) -> Harness {
    harness_with(predictor, |_| {})
}

pub fn harness_with(predictor: FakePredictor, tweak: impl FnOnce(&mut Config)) -> Harness {
    let dir = tempfile::tempdir().unwrap();
    let mut config = test_config(&dir);
    tweak(&mut config);

    let state = Arc::new(AppState::new(config).unwrap());
    let predictor = Arc::new(predictor);
    let (tx, rx) = kanal::unbounded_async();

    let ctx = AppContext::new(state, tx, predictor.clone(), CancellationToken::new());

    Harness {
        ctx,
        rx,
        predictor,
        _dir: dir,
    }
}

/// Wait for the next image or error, skipping form re-renders
pub async fn next_outcome(rx: &AsyncReceiver<AppEvent>) -> AppEvent {
    loop {
        let event = timeout(Duration::from_secs(3), rx.recv())
            .await
            .expect("timed out waiting for outcome")
            .expect("channel closed");

        match event {
            AppEvent::ShowImage(_) | AppEvent::ShowError(_) => return event,
            _ => continue,
        }
    }
}

pub fn drain(rx: &AsyncReceiver<AppEvent>) -> Vec<AppEvent> {
    let mut events = Vec::new();
    while let Ok(Some(event)) = rx.try_recv() {
        events.push(event);
    }
    events
}
