//! Scrapes CoinAfrique animal listings, cleans the resulting table and
//! exports it as CSV.

pub mod cleaner;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod parsers;
pub mod scrapers;
pub mod session;
pub mod utils;

pub use error::{Result, ScrapeError};
