use std::path::PathBuf;

use anyhow::Context;
use bestseat_catalog::Catalog;
use bestseat_client::Predictor;
use bestseat_config::Config;
use bestseat_core::SelectionForm;
use bestseat_io::ImageStore;
use bestseat_types::SelectionField;
use tokio_util::sync::CancellationToken;

use crate::events::select::resolve_choice;
use crate::events::submit::request_prediction;

/// Validate and submit a single selection, keeping the resulting image on disk
pub async fn predict_once(
    config: &Config,
    catalog: &Catalog,
    predictor: &dyn Predictor,
    choices: [(SelectionField, &str); 3],
    cancel: &CancellationToken,
) -> anyhow::Result<PathBuf> {
    let mut form = SelectionForm::new();
    for (field, value) in choices {
        let choice = resolve_choice(catalog, field, value).map_err(anyhow::Error::msg)?;
        form.select(field, choice.unwrap_or_default());
    }

    let selection = form.begin_submit()?;

    let result = request_prediction(
        predictor,
        &selection,
        config.network.timeout(),
        cancel,
    )
    .await;

    let payload = match result {
        Ok(payload) => payload,
        Err(e) => {
            let message = e.user_message();
            form.finish(Err(message.clone()));
            anyhow::bail!(message);
        }
    };

    let mut images = ImageStore::new(&config.ui.output_dir)?;
    images
        .store(&payload.bytes, payload.content_type.as_deref())
        .context("Failed to store prediction image")?;
    form.finish(Ok(payload.bytes));

    images
        .take()
        .map(|image| image.keep())
        .context("Prediction image missing after store")
}
