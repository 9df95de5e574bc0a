use chrono::Local;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use crate::config::Config;
use crate::error::{Result, ScrapeError};
use crate::models::{Category, RawTable, ScrapeBatch, SkipReason};
use crate::parsers::{parse_listing_page, CoinAfriqueExtractor, ListingExtractor};
use crate::utils::http::PageFetcher;

/// Progress of a running scrape, reported before each page is fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrapeProgress {
    pub page: u32,
    pub total: u32,
    pub rows_so_far: usize,
}

impl ScrapeProgress {
    pub fn fraction(&self) -> f64 {
        self.page as f64 / self.total as f64
    }
}

/// Listing URL for one page of a category.
pub fn page_url(base_url: &str, category: Category, page: u32) -> Result<String> {
    let base = Url::parse(base_url)?;
    let mut url = base.join(&format!("/categorie/{}", category.segment()))?;
    url.query_pairs_mut().append_pair("page", &page.to_string());
    Ok(url.to_string())
}

pub struct CoinAfriqueScraper {
    config: Arc<Config>,
    extractor: Box<dyn ListingExtractor>,
}

impl CoinAfriqueScraper {
    pub fn new(config: Arc<Config>) -> Self {
        Self::with_extractor(config, Box::new(CoinAfriqueExtractor))
    }

    pub fn with_extractor(config: Arc<Config>, extractor: Box<dyn ListingExtractor>) -> Self {
        Self { config, extractor }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub async fn scrape(
        &self,
        fetcher: &dyn PageFetcher,
        category: Category,
        page_count: u32,
    ) -> Result<ScrapeBatch> {
        self.scrape_with(fetcher, category, page_count, None, |_| {})
            .await
    }

    /// Fetch pages `1..=page_count` one at a time.
    ///
    /// A failed page or an unreadable card is recorded in the batch and the
    /// scrape moves on; only an invalid page count or base URL is an error.
    /// When `cancel` is set the scrape stops before the next page.
    pub async fn scrape_with<F>(
        &self,
        fetcher: &dyn PageFetcher,
        category: Category,
        page_count: u32,
        cancel: Option<&AtomicBool>,
        mut on_progress: F,
    ) -> Result<ScrapeBatch>
    where
        F: FnMut(ScrapeProgress) + Send,
    {
        if page_count == 0 || page_count > self.config.max_pages {
            return Err(ScrapeError::InvalidPageCount {
                count: page_count,
                max: self.config.max_pages,
            });
        }
        // Surface a bad base URL before any request goes out.
        page_url(&self.config.base_url, category, 1)?;

        info!("Scraping {} ({} pages)...", category, page_count);

        let delay = Duration::from_millis(self.config.politeness_delay_ms);
        let mut table = RawTable::new();
        let mut skipped = Vec::new();
        let mut pages_attempted = 0;

        for page in 1..=page_count {
            if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                info!("Scrape of {} cancelled before page {}", category, page);
                break;
            }

            on_progress(ScrapeProgress {
                page,
                total: page_count,
                rows_so_far: table.len(),
            });

            let url = page_url(&self.config.base_url, category, page)?;
            debug!("Fetching {}", url);
            pages_attempted += 1;

            match fetcher.fetch_page(&url).await {
                Ok(html) => {
                    let parsed =
                        parse_listing_page(&html, category, page, self.extractor.as_ref());
                    info!(
                        "Page {}/{}: {} listings, {} cards skipped",
                        page,
                        page_count,
                        parsed.rows.len(),
                        parsed.skipped.len()
                    );
                    table.extend(parsed.rows);
                    skipped.extend(parsed.skipped);
                }
                Err(e) => {
                    warn!("Page {} failed: {}", page, e);
                    skipped.push(SkipReason::PageFailed {
                        page,
                        url,
                        reason: e.to_string(),
                    });
                }
            }

            if page < page_count && !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
        }

        info!("Scraping finished: {} listings found for {}", table.len(), category);

        Ok(ScrapeBatch {
            category,
            pages_requested: page_count,
            pages_attempted,
            table,
            skipped,
            scraped_at: Local::now(),
        })
    }
}
