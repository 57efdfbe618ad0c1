use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use svgpaper_client::DEFAULT_BASE_URL;
use svgpaper_model::PreviewMode;

pub const DEFAULT_CONFIG_NAME: &str = "svgpaper.config.json";

/// Environment variable overriding `rpcUrl`
pub const RPC_URL_ENV: &str = "SVGPAPER_RPC_URL";

/// SVG Paper configuration file format
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Base URL of the rendering/validation service
    #[serde(default = "default_rpc_url")]
    pub rpc_url: String,

    /// Template directory used when a command gets no `--dir`
    #[serde(default = "default_template_dir")]
    pub template_dir: String,

    #[serde(default)]
    pub preview_mode: PreviewMode,

    /// Per-request timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_rpc_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_template_dir() -> String {
    "test-templates/delivery-slip/v1".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        let config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            serde_json::from_str(&content)?
        } else {
            // Return default config if none exists
            Config::default()
        };

        Ok(config.with_rpc_url_override(std::env::var(RPC_URL_ENV).ok()))
    }

    /// Replace `rpc_url` when an override is present and non-empty
    pub fn with_rpc_url_override(mut self, rpc_url: Option<String>) -> Self {
        if let Some(url) = rpc_url.filter(|url| !url.trim().is_empty()) {
            self.rpc_url = url;
        }
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rpc_url: default_rpc_url(),
            template_dir: default_template_dir(),
            preview_mode: PreviewMode::default(),
            timeout_secs: default_timeout_secs(),
        }
    }
}
