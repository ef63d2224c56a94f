use std::io::{self, Write};

use bestseat_types::{AppEvent, CatalogKind, SelectionView, UiEvent};

use crate::commands::HELP;

/// Render a backend event. Returns `false` once the UI should close.
pub fn handle_events<W: Write>(event: AppEvent, out: &mut W) -> io::Result<bool> {
    match event {
        AppEvent::UiEvent(UiEvent::Close) => {
            tracing::debug!("[UI] Close requested");
            return Ok(false);
        }
        AppEvent::UiEvent(UiEvent::Help) => writeln!(out, "{HELP}")?,
        AppEvent::ShowSelection(view) => render_selection(&view, out)?,
        AppEvent::ShowCatalog { kind, entries } => {
            let title = match kind {
                CatalogKind::Teams => "Teams",
                CatalogKind::Venues => "Venues",
            };
            writeln!(out, "{title} ({}):", entries.len())?;
            for entry in entries {
                writeln!(out, "  {entry}")?;
            }
        }
        AppEvent::SubmissionStarted { busy_label } => writeln!(out, "{busy_label}")?,
        AppEvent::ShowImage(image) => {
            tracing::debug!("[UI] Showing image {}", image.path.display());
            writeln!(
                out,
                "Best seat image ({}, {} bytes): {}",
                image.format,
                image.size,
                image.path.display()
            )?;
        }
        AppEvent::ShowError(message) => writeln!(out, "Error: {message}")?,
        AppEvent::StatusUpdate(status) => writeln!(out, "{status}")?,
        AppEvent::BackendReady => writeln!(out, "Prediction service reachable")?,
        _ => {}
    }

    out.flush()?;
    Ok(true)
}

fn render_selection<W: Write>(view: &SelectionView, out: &mut W) -> io::Result<()> {
    let show = |value: &Option<String>| value.clone().unwrap_or_else(|| "-".to_string());

    writeln!(out, "team1: {}", show(&view.team1))?;
    writeln!(out, "team2: {}", show(&view.team2))?;
    writeln!(out, "venue: {}", show(&view.venue))?;

    let state = if view.submit_enabled { "" } else { " (disabled)" };
    writeln!(out, "[{}]{}", view.submit_label, state)
}
