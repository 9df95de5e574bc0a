use serde::Serialize;
use std::collections::HashMap;

use crate::models::{Column, RawTable};
use crate::session::TableView;

const TOP_LOCATIONS: usize = 10;

/// Headline figures for the listing table currently on display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableSummary {
    pub listing_count: usize,
    /// Mean of the defined `PriceValue`s; raw tables have none.
    pub average_price: Option<f64>,
    /// Most frequent locations, by count then name.
    pub top_locations: Vec<(String, usize)>,
}

impl TableSummary {
    pub fn from_view(view: TableView<'_>) -> Self {
        match view {
            TableView::Raw(table) => Self::from_raw(table),
            TableView::Clean(table) => {
                let prices: Vec<f64> = table.price_values().flatten().collect();
                let average_price = if prices.is_empty() {
                    None
                } else {
                    Some(prices.iter().sum::<f64>() / prices.len() as f64)
                };
                let locations =
                    (0..table.len()).filter_map(|row| table.value(row, Column::Location));

                Self {
                    listing_count: table.len(),
                    average_price,
                    top_locations: top_counts(locations),
                }
            }
        }
    }

    pub fn from_raw(table: &RawTable) -> Self {
        Self {
            listing_count: table.len(),
            average_price: None,
            top_locations: top_counts(table.iter().map(|l| l.location.as_str())),
        }
    }
}

fn top_counts<'a>(values: impl Iterator<Item = &'a str>) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for value in values {
        *counts.entry(value).or_default() += 1;
    }

    let mut ranked: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(value, count)| (value.to_string(), count))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(TOP_LOCATIONS);
    ranked
}

/// `12 000 FCFA` style rendering, `N/A` for no value.
pub fn format_fcfa(amount: Option<f64>) -> String {
    let amount = match amount {
        Some(a) if a > 0.0 => a.round() as u64,
        _ => return "N/A".to_string(),
    };

    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }

    format!("{} FCFA", grouped)
}
