use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::env_var;

fn default_backend_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

/// Prediction backend connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Backend origin, `/predict` is appended by the client
    #[serde(default = "default_backend_url")]
    pub backend_url: String,
    /// Per-request timeout
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    /// Probe the backend once on startup
    #[serde(default)]
    pub check_on_startup: bool,
}

impl NetworkConfig {
    pub fn apply_env(&mut self) {
        if let Some(url) = env_var("BESTSEAT_BACKEND_URL") {
            self.backend_url = url;
        }

        if let Some(timeout) = env_var("BESTSEAT_TIMEOUT_SECONDS").and_then(|v| v.parse().ok()) {
            self.timeout_seconds = timeout;
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds.max(1))
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            backend_url: default_backend_url(),
            timeout_seconds: default_timeout_seconds(),
            check_on_startup: false,
        }
    }
}
