pub mod category;
pub mod listing;
pub mod report;

pub use category::*;
pub use listing::*;
pub use report::*;

/// Placeholder for a field the card markup did not provide.
pub const NOT_AVAILABLE: &str = "not available";

/// Placeholder the marketplace (and older exports) use for missing values.
pub const NA_MARKER: &str = "N/A";

/// Suffix appended to prices read from the `data-ad-price` attribute.
pub const CURRENCY_SUFFIX: &str = " FCFA";
