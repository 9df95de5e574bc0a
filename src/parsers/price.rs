use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::CURRENCY_SUFFIX;

static LEADING_DIGITS_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9]+").expect("Invalid digit regex"));

/// Numeric value of the first run of ASCII digits in a price string.
///
/// Only the first run is used, so thousands separators truncate the value:
/// `"7 500 FCFA"` yields `7`, not `7500`. Returns `None` when there are no digits.
pub fn parse_price_value(price: &str) -> Option<f64> {
    LEADING_DIGITS_REGEX
        .find(price)
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

/// Price string built from the raw `data-ad-price` attribute.
pub fn format_attribute_price(raw: &str) -> String {
    format!("{}{}", raw.trim(), CURRENCY_SUFFIX)
}
