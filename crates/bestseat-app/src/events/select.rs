use bestseat_catalog::Catalog;
use bestseat_types::{AppEvent, ImageView, SelectionField};

use crate::context::AppContext;

/// Canonical catalog name for user input; `None` clears the field
pub fn resolve_choice(
    catalog: &Catalog,
    field: SelectionField,
    value: &str,
) -> Result<Option<String>, String> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }

    match field {
        SelectionField::Team1 | SelectionField::Team2 => catalog
            .team(value)
            .map(|team| Some(team.name.clone()))
            .ok_or_else(|| format!("Unknown team: {value}")),
        SelectionField::Venue => catalog
            .stadium(value)
            .map(|name| Some(name.to_string()))
            .ok_or_else(|| format!("Unknown venue: {value}")),
    }
}

pub async fn handle_selection(
    ctx: &AppContext,
    field: SelectionField,
    value: &str,
) -> anyhow::Result<()> {
    match resolve_choice(&ctx.state.catalog, field, value) {
        Ok(choice) => {
            let view = {
                let mut form = ctx.state.form.lock().await;
                form.select(field, choice.unwrap_or_default());
                form.view()
            };
            ctx.send(AppEvent::ShowSelection(view)).await
        }
        Err(message) => {
            tracing::debug!("Rejected {} choice: {}", field, message);
            ctx.send(AppEvent::ShowError(message)).await
        }
    }
}

pub async fn handle_clear(ctx: &AppContext, field: SelectionField) -> anyhow::Result<()> {
    let view = {
        let mut form = ctx.state.form.lock().await;
        form.clear(field);
        form.view()
    };
    ctx.send(AppEvent::ShowSelection(view)).await
}

/// Clear all selections; the displayed image goes too unless a request is in flight
pub async fn handle_reset(ctx: &AppContext) -> anyhow::Result<()> {
    let (view, busy) = {
        let mut form = ctx.state.form.lock().await;
        form.reset();
        (form.view(), form.is_busy())
    };
    if !busy {
        ctx.state.images.lock().await.release();
    }
    ctx.send(AppEvent::ShowSelection(view)).await
}

/// Re-render the form along with the current image or error
pub async fn handle_show(ctx: &AppContext) -> anyhow::Result<()> {
    let (view, error) = {
        let form = ctx.state.form.lock().await;
        (form.view(), form.error().map(str::to_string))
    };
    ctx.send(AppEvent::ShowSelection(view)).await?;

    let image = ctx.state.images.lock().await.current().map(|image| ImageView {
        path: image.path().to_path_buf(),
        format: image.format_name(),
        size: image.size(),
    });

    if let Some(image) = image {
        ctx.send(AppEvent::ShowImage(image)).await?;
    } else if let Some(error) = error {
        ctx.send(AppEvent::ShowError(error)).await?;
    }

    Ok(())
}
