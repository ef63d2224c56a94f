//! Line-oriented console front end for the selection form.
//!
//! Input lines become [`AppEvent`]s for the backend; events coming back are
//! rendered to stdout. The loop ends when the backend echoes `Close`.

pub mod commands;
pub mod events;

use std::io::{self, Write};
use std::sync::Arc;

use bestseat_config::Config;
use bestseat_types::{AppEvent, UiEvent};
use kanal::{AsyncReceiver, AsyncSender};
use tokio::sync::RwLock;

pub use commands::{HELP, parse_command};
pub use events::handle_events;

pub async fn ui_loop(
    app_to_ui_rx: AsyncReceiver<AppEvent>,
    ui_to_app_tx: AsyncSender<AppEvent>,
    config: Arc<RwLock<Config>>,
) -> anyhow::Result<()> {
    let prompt = config.read().await.ui.prompt.clone();
    let interactive = atty::is(atty::Stream::Stdin);

    // Unbounded so the stdin callback never blocks and line order is kept
    let (line_tx, line_rx) = kanal::unbounded_async::<String>();
    tokio::spawn(async move {
        let result = bestseat_io::stdin::watch_stdin(move |line| {
            let _ = line_tx.try_send(line);
        })
        .await;
        if let Err(e) = result {
            tracing::error!("stdin watcher failed: {}", e);
        }
    });

    let mut stdout = io::stdout();
    if interactive {
        writeln!(stdout, "Type 'help' for commands")?;
    }

    run_console(
        line_rx,
        app_to_ui_rx,
        ui_to_app_tx,
        &mut stdout,
        interactive.then_some(prompt.as_str()),
    )
    .await
}

/// Drive the console from an already-split line source.
///
/// Commands are forwarded with `try_send` and never awaited. Closing `line_rx`
/// counts as `quit`.
pub async fn run_console<W: Write>(
    line_rx: AsyncReceiver<String>,
    app_to_ui_rx: AsyncReceiver<AppEvent>,
    ui_to_app_tx: AsyncSender<AppEvent>,
    out: &mut W,
    prompt: Option<&str>,
) -> anyhow::Result<()> {
    let mut input_open = true;

    if let Some(prompt) = prompt {
        write_prompt(out, prompt)?;
    }

    loop {
        tokio::select! {
            line = line_rx.recv(), if input_open => {
                match line {
                    Ok(line) => handle_line(&line, &ui_to_app_tx, out)?,
                    Err(_) => {
                        tracing::debug!("[UI] Input closed");
                        input_open = false;
                        forward(&ui_to_app_tx, AppEvent::UiEvent(UiEvent::Close))?;
                    }
                }
            }
            event = app_to_ui_rx.recv() => {
                let Ok(event) = event else {
                    tracing::warn!("[UI] Backend channel closed");
                    break;
                };
                if !handle_events(event, out)? {
                    break;
                }
            }
        }

        if let (Some(prompt), true) = (prompt, input_open) {
            write_prompt(out, prompt)?;
        }
    }

    Ok(())
}

fn handle_line<W: Write>(
    line: &str,
    ui_to_app_tx: &AsyncSender<AppEvent>,
    out: &mut W,
) -> anyhow::Result<()> {
    match parse_command(line) {
        Ok(AppEvent::UiEvent(UiEvent::Help)) => {
            handle_events(AppEvent::UiEvent(UiEvent::Help), out)?;
        }
        Ok(event) => forward(ui_to_app_tx, event)?,
        Err(hint) => writeln!(out, "{hint}")?,
    }
    Ok(())
}

fn forward(ui_to_app_tx: &AsyncSender<AppEvent>, event: AppEvent) -> anyhow::Result<()> {
    if !ui_to_app_tx.try_send(event)? {
        tracing::warn!("[UI] Backend queue full, command dropped");
    }
    Ok(())
}

fn write_prompt<W: Write>(out: &mut W, prompt: &str) -> io::Result<()> {
    write!(out, "{prompt}")?;
    out.flush()
}
