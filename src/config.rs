use serde::{Deserialize, Serialize};

use crate::error::Result;

pub const DEFAULT_BASE_URL: &str = "https://sn.coinafrique.com";
pub const MAX_PAGES: u32 = 50;
pub const MAX_ATTEMPTS: u32 = 5;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Country-specific marketplace host, without a trailing path.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Pause between successive page requests.
    #[serde(default = "default_politeness_delay_ms")]
    pub politeness_delay_ms: u64,
    /// Attempts per page; 1 means no retries.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_max_pages")]
    pub max_pages: u32,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/108.0.0.0 Safari/537.36".to_string()
}

fn default_request_timeout_secs() -> u64 {
    25
}

fn default_politeness_delay_ms() -> u64 {
    1000
}

fn default_max_attempts() -> u32 {
    1
}

fn default_max_pages() -> u32 {
    MAX_PAGES
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            request_timeout_secs: default_request_timeout_secs(),
            politeness_delay_ms: default_politeness_delay_ms(),
            max_attempts: default_max_attempts(),
            max_pages: default_max_pages(),
        }
    }
}

impl Config {
    /// Defaults, overridden by an optional `coinafrique.toml` and then by
    /// `COINAFRIQUE_*` environment variables.
    pub fn load() -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("coinafrique").required(false))
            .add_source(config::Environment::with_prefix("COINAFRIQUE").try_parsing(true))
            .build()?;

        let config: Config = settings.try_deserialize()?;
        Ok(config.normalized())
    }

    /// Pull loaded values back into their supported ranges.
    pub fn normalized(mut self) -> Self {
        self.base_url = self.base_url.trim_end_matches('/').to_string();
        self.max_pages = self.max_pages.clamp(1, MAX_PAGES);
        self.max_attempts = self.max_attempts.clamp(1, MAX_ATTEMPTS);
        self
    }
}
