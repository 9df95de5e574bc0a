use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Category, RawTable};

/// A unit of the scrape that contributed no rows, and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    PageFailed {
        page: u32,
        url: String,
        reason: String,
    },
    CardSkipped {
        page: u32,
        index: usize,
        reason: String,
    },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::PageFailed { page, url, reason } => {
                write!(f, "page {} ({}) skipped: {}", page, url, reason)
            }
            SkipReason::CardSkipped {
                page,
                index,
                reason,
            } => write!(f, "page {} card {} skipped: {}", page, index, reason),
        }
    }
}

/// Result of one scrape invocation: the raw rows plus everything that was skipped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeBatch {
    pub category: Category,
    pub pages_requested: u32,
    pub pages_attempted: u32,
    pub table: RawTable,
    pub skipped: Vec<SkipReason>,
    pub scraped_at: DateTime<Local>,
}

impl ScrapeBatch {
    pub fn pages_failed(&self) -> usize {
        self.skipped
            .iter()
            .filter(|s| matches!(s, SkipReason::PageFailed { .. }))
            .count()
    }

    pub fn cards_skipped(&self) -> usize {
        self.skipped
            .iter()
            .filter(|s| matches!(s, SkipReason::CardSkipped { .. }))
            .count()
    }
}
