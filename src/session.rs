//! The caller-owned "current batch": the last scrape and its cleaned table.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::cleaner::clean;
use crate::models::{CleanTable, RawTable, ScrapeBatch};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TableKind {
    Raw,
    Clean,
}

impl TableKind {
    /// Label used in export file names.
    pub fn label(&self) -> &'static str {
        match self {
            TableKind::Raw => "brutes",
            TableKind::Clean => "nettoyees",
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableKind::Raw => write!(f, "raw"),
            TableKind::Clean => write!(f, "clean"),
        }
    }
}

impl FromStr for TableKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "raw" | "brutes" => Ok(TableKind::Raw),
            "clean" | "nettoyees" | "nettoyées" => Ok(TableKind::Clean),
            other => Err(format!("unknown table kind: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum TableView<'a> {
    Raw(&'a RawTable),
    Clean(&'a CleanTable),
}

impl TableView<'_> {
    pub fn len(&self) -> usize {
        match self {
            TableView::Raw(t) => t.len(),
            TableView::Clean(t) => t.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone)]
pub struct CurrentBatch {
    pub batch: ScrapeBatch,
    pub clean: CleanTable,
}

#[derive(Debug, Default)]
pub struct Session {
    current: Option<CurrentBatch>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install `batch` as the current one, discarding whatever came before.
    pub fn replace(&mut self, batch: ScrapeBatch) -> &CurrentBatch {
        let clean = clean(&batch.table);
        self.current.insert(CurrentBatch { batch, clean })
    }

    pub fn current(&self) -> Option<&CurrentBatch> {
        self.current.as_ref()
    }

    pub fn view(&self, kind: TableKind) -> Option<TableView<'_>> {
        self.current.as_ref().map(|current| match kind {
            TableKind::Raw => TableView::Raw(&current.batch.table),
            TableKind::Clean => TableView::Clean(&current.clean),
        })
    }

    pub fn clear(&mut self) -> Option<CurrentBatch> {
        self.current.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Listing};
    use chrono::Local;

    fn batch(category: Category, locations: &[&str]) -> ScrapeBatch {
        ScrapeBatch {
            category,
            pages_requested: 1,
            pages_attempted: 1,
            table: RawTable::from(
                locations
                    .iter()
                    .map(|loc| Listing {
                        name: "n".to_string(),
                        price: "100 FCFA".to_string(),
                        location: loc.to_string(),
                        image_link: "i.jpg".to_string(),
                        category: category.display_name().to_string(),
                    })
                    .collect::<Vec<_>>(),
            ),
            skipped: Vec::new(),
            scraped_at: Local::now(),
        }
    }

    #[test]
    fn new_scrape_replaces_previous_batch() {
        let mut session = Session::new();
        assert!(session.view(TableKind::Raw).is_none());

        session.replace(batch(Category::Chiens, &["Dakar", "Thiès"]));
        session.replace(batch(Category::Moutons, &["Touba"]));

        let current = session.current().unwrap();
        assert_eq!(current.batch.category, Category::Moutons);
        assert_eq!(current.batch.table.len(), 1);
        assert_eq!(session.view(TableKind::Clean).unwrap().len(), 1);
    }

    #[test]
    fn keeps_raw_and_clean_views() {
        let mut session = Session::new();
        session.replace(batch(Category::Chiens, &[" dakar "]));

        match session.view(TableKind::Raw) {
            Some(TableView::Raw(raw)) => assert_eq!(raw.rows[0].location, " dakar "),
            other => panic!("unexpected view: {:?}", other),
        }
        match session.view(TableKind::Clean) {
            Some(TableView::Clean(clean)) => assert_eq!(clean.rows[0].cells[2], "DAKAR"),
            other => panic!("unexpected view: {:?}", other),
        }
    }

    #[test]
    fn parses_table_kinds() {
        assert_eq!("raw".parse::<TableKind>().unwrap(), TableKind::Raw);
        assert_eq!("Nettoyées".parse::<TableKind>().unwrap(), TableKind::Clean);
        assert!("both".parse::<TableKind>().is_err());
    }
}
