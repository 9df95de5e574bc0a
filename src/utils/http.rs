use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, Response};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{error, warn};

use crate::config::Config;
use crate::error::{Result, ScrapeError};

const MAX_RETRY_DELAY: Duration = Duration::from_secs(30);

pub fn create_client(config: &Config) -> Result<Client> {
    let client = ClientBuilder::new()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .build()?;

    Ok(client)
}

/// GET `url`, trying at most `max_attempts` times with exponential back-off.
///
/// A non-success status counts as a failed attempt.
pub async fn fetch_with_retry(client: &Client, url: &str, max_attempts: u32) -> Result<Response> {
    let max_attempts = max_attempts.max(1);
    let mut attempts = 0;

    loop {
        let err = match client.get(url).send().await {
            Ok(response) if response.status().is_success() => return Ok(response),
            Ok(response) => {
                let status = response.status();
                warn!("HTTP error {}: {}", status, url);
                ScrapeError::Status {
                    status,
                    url: url.to_string(),
                }
            }
            Err(e) => {
                error!("Request failed for {}: {}", url, e);
                ScrapeError::Http(e)
            }
        };

        attempts += 1;
        if attempts >= max_attempts {
            return Err(err);
        }

        let delay = retry_delay(attempts);
        warn!("Retrying in {:?}... (attempt {}/{})", delay, attempts + 1, max_attempts);
        sleep(delay).await;
    }
}

/// Back-off before retry number `attempt` (1-based): `2^attempt` seconds, capped.
pub fn retry_delay(attempt: u32) -> Duration {
    2u64.checked_pow(attempt)
        .map(Duration::from_secs)
        .map_or(MAX_RETRY_DELAY, |delay| delay.min(MAX_RETRY_DELAY))
}

/// Source of listing page bodies.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch_page(&self, url: &str) -> Result<String>;
}

pub struct HttpFetcher {
    client: Client,
    max_attempts: u32,
}

impl HttpFetcher {
    pub fn new(client: Client, max_attempts: u32) -> Self {
        Self {
            client,
            max_attempts,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(create_client(config)?, config.max_attempts))
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch_page(&self, url: &str) -> Result<String> {
        let response = fetch_with_retry(&self.client, url, self.max_attempts).await?;
        Ok(response.text().await?)
    }
}
