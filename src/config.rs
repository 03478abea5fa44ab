use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

const APP_NAME: &str = "ccdash";

/// Application configuration, stored via confy under the platform config dir
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Command used to produce the usage reports
    pub usage_command: String,
    /// Timeout for one report invocation, in seconds
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            usage_command: "ccusage".to_string(),
            timeout_secs: 30,
        }
    }
}

pub fn load_config() -> Result<Config> {
    confy::load(APP_NAME, None).context("Failed to load configuration")
}
