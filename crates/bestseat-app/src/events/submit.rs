use std::time::Duration;

use bestseat_client::{PredictError, PredictionPayload, Predictor};
use bestseat_core::SubmitRejected;
use bestseat_types::{AppEvent, ImageView, Selection, UiEvent};
use tokio_util::sync::CancellationToken;

use crate::context::AppContext;
use crate::state::InFlight;

/// Run one prediction request, bounded by `timeout` and abortable through `cancel`
pub async fn request_prediction(
    predictor: &dyn Predictor,
    selection: &Selection,
    timeout: Duration,
    cancel: &CancellationToken,
) -> Result<PredictionPayload, PredictError> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(PredictError::Cancelled),
        result = tokio::time::timeout(timeout, predictor.predict(selection)) => {
            result.unwrap_or(Err(PredictError::Timeout(timeout)))
        }
    }
}

pub async fn handle_submit(ctx: &AppContext) -> anyhow::Result<()> {
    let (selection, busy_label) = {
        let mut form = ctx.state.form.lock().await;
        match form.begin_submit() {
            Ok(selection) => (selection, form.submit_label().to_string()),
            Err(SubmitRejected::InFlight) => {
                tracing::debug!("Submit ignored, prediction already in flight");
                return Ok(());
            }
            Err(SubmitRejected::Invalid(e)) => {
                drop(form);
                ctx.state.images.lock().await.release();
                return ctx.send(AppEvent::ShowError(e.to_string())).await;
            }
        }
    };

    ctx.state.images.lock().await.release();
    ctx.send(AppEvent::SubmissionStarted { busy_label }).await?;

    let cancel = ctx.cancel.child_token();
    let task_ctx = ctx.clone();
    let task_cancel = cancel.clone();
    let handle = tokio::spawn(async move {
        if let Err(e) = run_submission(&task_ctx, selection, task_cancel).await {
            tracing::error!("Submission failed to settle: {e:#}");
        }
    });

    *ctx.state.in_flight.lock().await = Some(InFlight { cancel, handle });
    Ok(())
}

async fn run_submission(
    ctx: &AppContext,
    selection: Selection,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let timeout = ctx.state.config.read().await.network.timeout();

    let outcome = request_prediction(ctx.predictor.as_ref(), &selection, timeout, &cancel).await;

    // Held until the outcome event is queued, so a submit handled meanwhile
    // still sees the form busy and cannot release the image being shown
    let mut form = ctx.state.form.lock().await;

    let (form_outcome, event) = match outcome {
        Ok(payload) => {
            let mut images = ctx.state.images.lock().await;
            match images.store(&payload.bytes, payload.content_type.as_deref()) {
                Ok(image) => {
                    let view = ImageView {
                        path: image.path().to_path_buf(),
                        format: image.format_name(),
                        size: image.size(),
                    };
                    (Ok(payload.bytes), AppEvent::ShowImage(view))
                }
                Err(e) => {
                    tracing::error!("{}", e);
                    (Err(e.to_string()), AppEvent::ShowError(e.to_string()))
                }
            }
        }
        Err(e) => {
            tracing::info!("Prediction failed: {}", e);
            let message = e.user_message();
            (Err(message.clone()), AppEvent::ShowError(message))
        }
    };

    form.finish(form_outcome);
    ctx.send(event).await
}

pub async fn handle_cancel(ctx: &AppContext) -> anyhow::Result<()> {
    let busy = ctx.state.form.lock().await.is_busy();
    let in_flight = ctx.state.in_flight.lock().await;

    match in_flight.as_ref() {
        Some(in_flight) if busy => {
            tracing::info!("Cancelling prediction request");
            in_flight.cancel.cancel();
            Ok(())
        }
        _ => {
            drop(in_flight);
            ctx.send(AppEvent::StatusUpdate("Nothing to cancel".to_string()))
                .await
        }
    }
}

/// Let any in-flight submission settle, then tell the UI to close
pub async fn handle_close(ctx: &AppContext) -> anyhow::Result<()> {
    let in_flight = ctx.state.in_flight.lock().await.take();

    if let Some(in_flight) = in_flight {
        if !in_flight.handle.is_finished() {
            tracing::info!("Waiting for prediction in flight before closing");
        }
        if let Err(e) = in_flight.handle.await {
            tracing::error!("Submission task panicked: {}", e);
        }
    }

    ctx.send(AppEvent::UiEvent(UiEvent::Close)).await
}
