use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScrapeError>;

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Page count must be between 1 and {max}, got {count}")]
    InvalidPageCount { count: u32, max: u32 },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP error {status} for {url}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

/// Why a single listing card could not be turned into a row.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("card has neither a price paragraph nor a data-ad-price attribute")]
    MissingPrice,

    #[error("card has no location span")]
    MissingLocation,
}
