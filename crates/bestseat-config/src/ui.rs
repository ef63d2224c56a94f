use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::env_var;

fn default_output_dir() -> PathBuf {
    std::env::temp_dir().join("bestseat")
}

fn default_prompt() -> String {
    "bestseat> ".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Where prediction images are written
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default = "default_prompt")]
    pub prompt: String,
}

impl UiConfig {
    pub fn apply_env(&mut self) {
        if let Some(dir) = env_var("BESTSEAT_OUTPUT_DIR") {
            self.output_dir = PathBuf::from(dir);
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            prompt: default_prompt(),
        }
    }
}
