//! Derives the cleaned table from a raw scrape.

pub mod summary;

pub use summary::{format_fcfa, TableSummary};

use crate::models::{is_missing, CleanRow, CleanTable, Column, Listing, RawTable};
use crate::parsers::{normalize_location, parse_price_value};

/// Build the cleaned view of `table` without touching it.
///
/// Adds `PriceValue` (leading digit run of `Price`, `None` when absent),
/// upper-cases and trims `Location`, and drops every text column whose value
/// is missing in all rows. `PriceValue` is never dropped. An empty table keeps
/// all columns.
pub fn clean(table: &RawTable) -> CleanTable {
    let normalized: Vec<Listing> = table
        .iter()
        .map(|listing| Listing {
            location: normalize_location(&listing.location),
            ..listing.clone()
        })
        .collect();

    let dropped_columns = empty_columns(&normalized);
    let kept: Vec<Column> = Column::TEXT
        .into_iter()
        .filter(|c| !dropped_columns.contains(c))
        .collect();

    let rows = normalized
        .iter()
        .map(|listing| CleanRow {
            cells: kept
                .iter()
                .filter_map(|c| listing.get(*c))
                .map(str::to_string)
                .collect(),
            price_value: parse_price_value(&listing.price),
        })
        .collect();

    let mut columns = kept;
    columns.push(Column::PriceValue);

    CleanTable {
        columns,
        rows,
        dropped_columns,
    }
}

/// Text columns whose value is missing in every row.
fn empty_columns(rows: &[Listing]) -> Vec<Column> {
    if rows.is_empty() {
        return Vec::new();
    }

    Column::TEXT
        .into_iter()
        .filter(|column| {
            rows.iter()
                .all(|row| row.get(*column).map_or(true, is_missing))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NOT_AVAILABLE;
    use pretty_assertions::assert_eq;

    fn listing(name: &str, price: &str, location: &str, image: &str) -> Listing {
        Listing {
            name: name.to_string(),
            price: price.to_string(),
            location: location.to_string(),
            image_link: image.to_string(),
            category: "Chiens".to_string(),
        }
    }

    #[test]
    fn derives_price_value_from_leading_digits() {
        let raw = RawTable::from(vec![
            listing("a", "12000 FCFA", "Dakar", "1.jpg"),
            listing("b", "N/A", "Dakar", "2.jpg"),
            listing("c", "7 500 FCFA", "Dakar", "3.jpg"),
        ]);

        let cleaned = clean(&raw);
        let values: Vec<_> = cleaned.price_values().collect();
        assert_eq!(values, vec![Some(12000.0), None, Some(7.0)]);
    }

    #[test]
    fn uppercases_and_trims_location() {
        let raw = RawTable::from(vec![listing("a", "1", "  Pikine, Dakar ", "1.jpg")]);
        let cleaned = clean(&raw);
        assert_eq!(cleaned.value(0, Column::Location), Some("PIKINE, DAKAR"));
    }

    #[test]
    fn drops_columns_missing_in_every_row() {
        let raw = RawTable::from(vec![
            listing(NOT_AVAILABLE, "1000", "Dakar", NOT_AVAILABLE),
            listing("Chiot", "2000", "Thiès", " not available "),
        ]);

        let cleaned = clean(&raw);
        assert_eq!(cleaned.dropped_columns, vec![Column::ImageLink]);
        assert_eq!(
            cleaned.columns,
            vec![
                Column::Name,
                Column::Price,
                Column::Location,
                Column::Category,
                Column::PriceValue
            ]
        );
        assert!(!cleaned.has_column(Column::ImageLink));
        assert_eq!(cleaned.value(0, Column::Name), Some(NOT_AVAILABLE));
        assert_eq!(cleaned.rows[1].cells, vec!["Chiot", "2000", "THIÈS", "Chiens"]);
    }

    #[test]
    fn price_value_survives_when_every_price_is_missing() {
        let raw = RawTable::from(vec![listing("a", "N/A", "Dakar", "1.jpg")]);
        let cleaned = clean(&raw);

        assert_eq!(cleaned.dropped_columns, vec![Column::Price]);
        assert!(cleaned.has_column(Column::PriceValue));
        assert_eq!(cleaned.rows[0].price_value, None);
    }

    #[test]
    fn leaves_raw_table_untouched() {
        let raw = RawTable::from(vec![listing("a", "5 FCFA", " dakar ", NOT_AVAILABLE)]);
        let before = raw.clone();
        let _ = clean(&raw);
        assert_eq!(raw, before);
    }

    #[test]
    fn cleaning_twice_keeps_derived_values() {
        let raw = RawTable::from(vec![
            listing("a", "12000 FCFA", " mbour ", "1.jpg"),
            listing("b", "N/A", "Saint-Louis", "2.jpg"),
        ]);
        let first = clean(&raw);

        let reclean_input = RawTable::from(
            raw.iter()
                .map(|l| Listing {
                    location: normalize_location(&l.location),
                    ..l.clone()
                })
                .collect::<Vec<_>>(),
        );
        let second = clean(&reclean_input);

        assert_eq!(first, second);
    }

    #[test]
    fn empty_table_drops_nothing() {
        let cleaned = clean(&RawTable::new());
        assert!(cleaned.is_empty());
        assert!(cleaned.dropped_columns.is_empty());
        assert_eq!(cleaned.columns.len(), 6);
    }
}
