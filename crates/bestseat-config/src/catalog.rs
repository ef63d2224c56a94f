use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::env_var;

/// Optional on-disk replacements for the bundled catalogs
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub teams_file: Option<PathBuf>,
    pub stadiums_file: Option<PathBuf>,
}

impl CatalogConfig {
    pub fn apply_env(&mut self) {
        if let Some(path) = env_var("BESTSEAT_TEAMS_FILE") {
            self.teams_file = Some(PathBuf::from(path));
        }
        if let Some(path) = env_var("BESTSEAT_STADIUMS_FILE") {
            self.stadiums_file = Some(PathBuf::from(path));
        }
    }
}
