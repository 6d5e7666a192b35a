use std::sync::OnceLock;

use scraper::Selector;

use super::{fetch, PageSelectors, Scraper};
use crate::errors::ExtractError;
use crate::records::{Extraction, SourceEntry};

pub const CHAIN_ID: &str = "SRyhma";

const NAME_SELECTOR: &str = r#"h1[data-test-id="product-name"]"#;
const UNIT_PRICE_SELECTOR: &str = r#"span[data-test-id="product-price__unitPrice"]"#;
const COMPARISON_PRICE_SELECTOR: &str = r#"div[data-test-id="product-page-price__comparisonPrice"]"#;

fn selectors() -> &'static PageSelectors {
    static SELECTORS: OnceLock<PageSelectors> = OnceLock::new();
    SELECTORS.get_or_init(|| PageSelectors {
        product_name: Selector::parse(NAME_SELECTOR).expect("static selector"),
        unit_price: Selector::parse(UNIT_PRICE_SELECTOR).expect("static selector"),
        comparison_price: Selector::parse(COMPARISON_PRICE_SELECTOR).expect("static selector"),
    })
}

/// S-Group product pages (`data-test-id` anchored markup).
pub struct SRyhma {
    client: reqwest::blocking::Client,
}

impl SRyhma {
    pub fn new(client: reqwest::blocking::Client) -> Self {
        SRyhma { client }
    }

    pub fn parse(html: &str) -> Extraction {
        selectors().extract(html)
    }
}

impl Scraper for SRyhma {
    fn chain_id(&self) -> &str {
        CHAIN_ID
    }

    fn extract(&self, entry: &SourceEntry) -> Result<Extraction, ExtractError> {
        let html = fetch(&self.client, &entry.url)?;
        let extraction = Self::parse(&html);
        if extraction.is_empty() {
            return Err(ExtractError::MarkupMissing {
                url: entry.url.clone(),
            });
        }
        Ok(extraction)
    }
}
