use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::warn;

use super::{element_text, format_attribute_price, stripped_text};
use crate::error::ExtractError;
use crate::models::{Category, Listing, SkipReason, NOT_AVAILABLE};

static CARD_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.col.s6.m4.l3").expect("Invalid card selector"));
static NAME_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a.card-image").expect("Invalid name selector"));
static PRICE_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("p.ad__card-price, p.ad_card-price").expect("Invalid price selector")
});
static PRICE_BUTTON_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("span.btn-floating[data-ad-price]").expect("Invalid price button selector")
});
static LOCATION_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("p.ad__card-location > span").expect("Invalid location selector")
});
static IMAGE_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("img.ad__card-image, img.ad_card-image").expect("Invalid image selector")
});

/// Markup rules for turning one listing card into a row.
pub trait ListingExtractor: Send + Sync {
    fn container_selector(&self) -> &Selector;
    fn extract_listing(
        &self,
        container: ElementRef<'_>,
        category: Category,
    ) -> Result<Listing, ExtractError>;
}

/// Card layout used by the CoinAfrique listing grid.
#[derive(Debug, Default, Clone, Copy)]
pub struct CoinAfriqueExtractor;

impl ListingExtractor for CoinAfriqueExtractor {
    fn container_selector(&self) -> &Selector {
        &CARD_SELECTOR
    }

    fn extract_listing(
        &self,
        container: ElementRef<'_>,
        category: Category,
    ) -> Result<Listing, ExtractError> {
        let name = container
            .select(&NAME_SELECTOR)
            .next()
            .and_then(|a| a.value().attr("title"))
            .map(|title| title.trim().to_string())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());

        let price = match container.select(&PRICE_SELECTOR).next() {
            Some(p) => stripped_text(p),
            None => container
                .select(&PRICE_BUTTON_SELECTOR)
                .next()
                .and_then(|span| span.value().attr("data-ad-price"))
                .map(format_attribute_price)
                .ok_or(ExtractError::MissingPrice)?,
        };

        let location = container
            .select(&LOCATION_SELECTOR)
            .next()
            .map(element_text)
            .ok_or(ExtractError::MissingLocation)?;

        let image_link = container
            .select(&IMAGE_SELECTOR)
            .next()
            .and_then(|img| img.value().attr("src"))
            .map(str::to_string)
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());

        Ok(Listing {
            name,
            price,
            location,
            image_link,
            category: category.display_name().to_string(),
        })
    }
}

/// Rows and card-level skips from a single listing page.
#[derive(Debug, Default)]
pub struct PageParse {
    pub rows: Vec<Listing>,
    pub skipped: Vec<SkipReason>,
}

pub fn parse_listing_page(
    html: &str,
    category: Category,
    page: u32,
    extractor: &dyn ListingExtractor,
) -> PageParse {
    let document = Html::parse_document(html);
    let mut parsed = PageParse::default();

    for (index, container) in document.select(extractor.container_selector()).enumerate() {
        match extractor.extract_listing(container, category) {
            Ok(listing) => parsed.rows.push(listing),
            Err(e) => {
                warn!("Skipping card {} on page {}: {}", index, page, e);
                parsed.skipped.push(SkipReason::CardSkipped {
                    page,
                    index,
                    reason: e.to_string(),
                });
            }
        }
    }

    parsed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(body: &str) -> String {
        format!(r#"<div class="col s6 m4 l3"><div class="card ad__card">{}</div></div>"#, body)
    }

    const FULL_CARD: &str = r#"
        <a class="card-image ad__card-image waves-block" title="Chiot berger allemand" href="/annonce/1">
            <img class="ad__card-image" src="https://images.coinafrique.com/1.jpg">
        </a>
        <p class="ad__card-price">120 000 CFA</p>
        <p class="ad__card-location"><span class="valign-wrapper">  Dakar, Sénégal </span></p>
    "#;

    #[test]
    fn extracts_all_fields_from_a_full_card() {
        let html = card(FULL_CARD);
        let parsed = parse_listing_page(&html, Category::Chiens, 1, &CoinAfriqueExtractor);

        assert!(parsed.skipped.is_empty());
        assert_eq!(
            parsed.rows,
            vec![Listing {
                name: "Chiot berger allemand".to_string(),
                price: "120 000 CFA".to_string(),
                location: "Dakar, Sénégal".to_string(),
                image_link: "https://images.coinafrique.com/1.jpg".to_string(),
                category: "Chiens".to_string(),
            }]
        );
    }

    #[test]
    fn falls_back_to_data_ad_price_attribute() {
        let html = card(
            r#"<span class="btn-floating" data-ad-price="45000"></span>
               <p class="ad__card-location"><span>Thiès</span></p>"#,
        );
        let parsed = parse_listing_page(&html, Category::Moutons, 2, &CoinAfriqueExtractor);

        let row = &parsed.rows[0];
        assert_eq!(row.price, "45000 FCFA");
        assert_eq!(row.name, NOT_AVAILABLE);
        assert_eq!(row.image_link, NOT_AVAILABLE);
        assert_eq!(row.category, "Moutons");
    }

    #[test]
    fn malformed_card_is_skipped_and_page_continues() {
        let html = format!(
            "{}{}{}",
            card(FULL_CARD),
            card(r#"<p class="ad__card-location"><span>Mbour</span></p>"#),
            card(FULL_CARD)
        );
        let parsed = parse_listing_page(&html, Category::Chiens, 3, &CoinAfriqueExtractor);

        assert_eq!(parsed.rows.len(), 2);
        assert_eq!(
            parsed.skipped,
            vec![SkipReason::CardSkipped {
                page: 3,
                index: 1,
                reason: ExtractError::MissingPrice.to_string(),
            }]
        );
    }

    #[test]
    fn location_text_is_only_trimmed() {
        let html = card(
            "<p class=\"ad__card-price\">5000</p>\
             <p class=\"ad__card-location\"><span> Code &amp;lt;Dakar&amp;gt;\n Plateau </span></p>",
        );
        let parsed = parse_listing_page(&html, Category::Chiens, 1, &CoinAfriqueExtractor);
        assert_eq!(parsed.rows[0].location, "Code &lt;Dakar&gt;\n Plateau");
    }

    #[test]
    fn card_without_location_is_skipped() {
        let html = card(r#"<p class="ad__card-price">10 000 CFA</p>"#);
        let parsed = parse_listing_page(&html, Category::AutresAnimaux, 1, &CoinAfriqueExtractor);

        assert!(parsed.rows.is_empty());
        assert_eq!(parsed.skipped.len(), 1);
    }

    #[test]
    fn page_without_cards_yields_nothing() {
        let parsed = parse_listing_page(
            "<html><body><p>Aucune annonce</p></body></html>",
            Category::Chiens,
            1,
            &CoinAfriqueExtractor,
        );
        assert!(parsed.rows.is_empty());
        assert!(parsed.skipped.is_empty());
    }
}
