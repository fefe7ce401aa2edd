use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Base URL of the deck server.
    pub server_url: String,
    pub log_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:5000".to_string(),
            log_path: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("DECKEDIT_SERVER") {
            if !url.is_empty() {
                config.server_url = url;
            }
        }

        if let Ok(path) = std::env::var("DECKEDIT_LOG_PATH") {
            config.log_path = Some(PathBuf::from(path));
        }

        config
    }
}
