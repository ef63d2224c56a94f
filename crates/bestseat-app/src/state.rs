use std::sync::Arc;

use anyhow::Context;
use bestseat_catalog::Catalog;
use bestseat_config::Config;
use bestseat_core::SelectionForm;
use bestseat_io::ImageStore;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Handle on the submission currently in flight
pub struct InFlight {
    pub cancel: CancellationToken,
    pub handle: JoinHandle<()>,
}

pub struct AppState {
    pub config: Arc<RwLock<Config>>,
    pub catalog: Catalog,
    pub form: Mutex<SelectionForm>,
    pub images: Mutex<ImageStore>,
    pub in_flight: Mutex<Option<InFlight>>,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let catalog = Catalog::load(
            config.catalog.teams_file.as_deref(),
            config.catalog.stadiums_file.as_deref(),
        )
        .context("Failed to load team/stadium catalog")?;

        let images = ImageStore::new(&config.ui.output_dir)?;

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            catalog,
            form: Mutex::new(SelectionForm::new()),
            images: Mutex::new(images),
            in_flight: Mutex::new(None),
        })
    }
}
