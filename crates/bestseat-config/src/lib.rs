use serde::{Deserialize, Serialize};

use self::catalog::CatalogConfig;
use self::network::NetworkConfig;
use self::ui::UiConfig;

pub mod catalog;
pub mod network;
pub mod ui;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub network: NetworkConfig,
    pub ui: UiConfig,
    pub catalog: CatalogConfig,
}

impl Config {
    /// Overlay `BESTSEAT_*` environment variables onto the current values
    pub fn apply_env(&mut self) {
        self.network.apply_env();
        self.ui.apply_env();
        self.catalog.apply_env();
    }
}

pub(crate) fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
