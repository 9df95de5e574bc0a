pub mod listing;
pub mod price;

pub use listing::*;
pub use price::*;

use scraper::ElementRef;

/// Text of `element` with surrounding whitespace removed.
///
/// `scraper` has already decoded entities, so the text is used as is.
pub fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Text nodes of `element`, each trimmed, concatenated.
pub fn stripped_text(element: ElementRef<'_>) -> String {
    element.text().map(str::trim).collect()
}

/// Upper-cased, trimmed location as shown in the cleaned table.
pub fn normalize_location(location: &str) -> String {
    location.trim().to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    fn first_span(html: &str) -> String {
        let fragment = Html::parse_fragment(html);
        let selector = Selector::parse("span").unwrap();
        let span = fragment.select(&selector).next().unwrap();
        element_text(span)
    }

    #[test]
    fn element_text_decodes_entities_once() {
        assert_eq!(
            first_span("<span> Code &amp;lt;Dakar&amp;gt;\n Plateau </span>"),
            "Code &lt;Dakar&gt;\n Plateau"
        );
        assert_eq!(first_span("<span>Médina &amp; Fann</span>"), "Médina & Fann");
    }

    #[test]
    fn stripped_text_joins_trimmed_nodes() {
        let fragment = Html::parse_fragment("<p> 120 000 <b> CFA </b></p>");
        let selector = Selector::parse("p").unwrap();
        let p = fragment.select(&selector).next().unwrap();
        assert_eq!(stripped_text(p), "120 000CFA");
    }

    #[test]
    fn normalize_location_is_idempotent() {
        let once = normalize_location("  Dakar, Sénégal ");
        assert_eq!(once, "DAKAR, SÉNÉGAL");
        assert_eq!(normalize_location(&once), once);
    }
}
