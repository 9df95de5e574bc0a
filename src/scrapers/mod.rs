mod coinafrique;

pub use coinafrique::{page_url, CoinAfriqueScraper, ScrapeProgress};
