use serde::{Deserialize, Serialize};
use std::fmt;

use super::{NA_MARKER, NOT_AVAILABLE};

/// One classified ad as read from a listing card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Price")]
    pub price: String,
    #[serde(rename = "Location")]
    pub location: String,
    #[serde(rename = "ImageLink")]
    pub image_link: String,
    #[serde(rename = "Category")]
    pub category: String,
}

impl Listing {
    pub fn get(&self, column: Column) -> Option<&str> {
        match column {
            Column::Name => Some(&self.name),
            Column::Price => Some(&self.price),
            Column::Location => Some(&self.location),
            Column::ImageLink => Some(&self.image_link),
            Column::Category => Some(&self.category),
            Column::PriceValue => None,
        }
    }
}

/// True for values that carry no data: the sentinels or an empty string.
pub fn is_missing(value: &str) -> bool {
    let value = value.trim();
    value.is_empty() || value == NOT_AVAILABLE || value == NA_MARKER
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Column {
    Name,
    Price,
    Location,
    ImageLink,
    Category,
    PriceValue,
}

impl Column {
    /// Columns present on every raw row, in export order.
    pub const TEXT: [Column; 5] = [
        Column::Name,
        Column::Price,
        Column::Location,
        Column::ImageLink,
        Column::Category,
    ];

    pub fn header(&self) -> &'static str {
        match self {
            Column::Name => "Name",
            Column::Price => "Price",
            Column::Location => "Location",
            Column::ImageLink => "ImageLink",
            Column::Category => "Category",
            Column::PriceValue => "PriceValue",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.header())
    }
}

/// Listings in page order, then card order within a page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTable {
    pub rows: Vec<Listing>,
}

impl RawTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Listing> {
        self.rows.iter()
    }

    pub fn extend(&mut self, rows: impl IntoIterator<Item = Listing>) {
        self.rows.extend(rows);
    }
}

impl From<Vec<Listing>> for RawTable {
    fn from(rows: Vec<Listing>) -> Self {
        Self { rows }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanRow {
    /// Values of the surviving text columns, aligned with `CleanTable::text_columns`.
    pub cells: Vec<String>,
    pub price_value: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CleanTable {
    /// Surviving columns in export order; `PriceValue` is always last.
    pub columns: Vec<Column>,
    pub rows: Vec<CleanRow>,
    pub dropped_columns: Vec<Column>,
}

impl CleanTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, column: Column) -> bool {
        self.columns.contains(&column)
    }

    pub fn text_columns(&self) -> impl Iterator<Item = Column> + '_ {
        self.columns
            .iter()
            .copied()
            .filter(|c| *c != Column::PriceValue)
    }

    /// Text value of `column` in row `row`, `None` when the column was dropped.
    pub fn value(&self, row: usize, column: Column) -> Option<&str> {
        let position = self.text_columns().position(|c| c == column)?;
        self.rows
            .get(row)
            .and_then(|r| r.cells.get(position))
            .map(String::as_str)
    }

    pub fn price_values(&self) -> impl Iterator<Item = Option<f64>> + '_ {
        self.rows.iter().map(|r| r.price_value)
    }
}
