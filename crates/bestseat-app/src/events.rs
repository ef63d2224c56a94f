use kanal::AsyncReceiver;
use bestseat_types::{AppEvent, UiEvent};

use crate::context::AppContext;

pub mod catalog;
pub mod select;
pub mod submit;

use catalog::handle_list_catalog;
use select::{handle_clear, handle_reset, handle_selection, handle_show};
use submit::{handle_cancel, handle_close, handle_submit};

/// App's main loop
pub async fn event_loop(ctx: AppContext, ui_to_app_rx: AsyncReceiver<AppEvent>) -> anyhow::Result<()> {
    tracing::info!("[EVENT_LOOP] Starting main loop, waiting for events");

    if let Err(e) = handle_show(&ctx).await {
        tracing::warn!("Initial render failed: {}", e);
    }

    loop {
        let event = tokio::select! {
            event = ui_to_app_rx.recv() => event?,
            _ = ctx.cancel.cancelled() => {
                tracing::info!("[EVENT_LOOP] Cancelled");
                return Ok(());
            }
        };

        tracing::debug!("[EVENT_LOOP] Event received: {:?}", event);

        match handle_events(&ctx, event).await {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => tracing::error!("[EVENT_LOOP] Handler failed: {e:#}"),
        }
    }

    tracing::info!("[EVENT_LOOP] Stopped");
    Ok(())
}

/// Dispatch one event. Returns `false` when the loop should stop.
pub async fn handle_events(ctx: &AppContext, event: AppEvent) -> anyhow::Result<bool> {
    match event {
        AppEvent::SelectionChanged { field, value } => {
            handle_selection(ctx, field, &value).await?;
        }
        AppEvent::ClearField(field) => {
            handle_clear(ctx, field).await?;
        }
        AppEvent::ResetForm => {
            handle_reset(ctx).await?;
        }
        AppEvent::Submit => {
            handle_submit(ctx).await?;
        }
        AppEvent::Cancel => {
            handle_cancel(ctx).await?;
        }
        AppEvent::ListCatalog(kind) => {
            handle_list_catalog(ctx, kind).await?;
        }
        AppEvent::UiEvent(UiEvent::Show) => {
            handle_show(ctx).await?;
        }
        AppEvent::UiEvent(UiEvent::Close) => {
            handle_close(ctx).await?;
            return Ok(false);
        }
        // Backend -> UI events, nothing to do here
        AppEvent::UiEvent(UiEvent::Help)
        | AppEvent::ShowCatalog { .. }
        | AppEvent::ShowSelection(_)
        | AppEvent::SubmissionStarted { .. }
        | AppEvent::ShowImage(_)
        | AppEvent::ShowError(_)
        | AppEvent::StatusUpdate(_)
        | AppEvent::BackendReady => {}
    }

    Ok(true)
}
