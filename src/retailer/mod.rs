pub mod sryhma;

use scraper::{Html, Selector};

use crate::errors::ExtractError;
use crate::records::{Extraction, SourceEntry};

pub use sryhma::SRyhma;

/// A retailer family whose product pages can be scraped.
///
/// Variants only report what went wrong; the snapshot builder is the single
/// place that turns an error into a logged, empty-field record.
pub trait Scraper {
    /// Constant label stamped on every record from this retailer.
    fn chain_id(&self) -> &str;

    fn extract(&self, entry: &SourceEntry) -> Result<Extraction, ExtractError>;
}

/// CSS anchors for the three fields of a product page.
pub struct PageSelectors {
    pub product_name: Selector,
    pub unit_price: Selector,
    pub comparison_price: Selector,
}

impl PageSelectors {
    /// Pull each field independently; a missing anchor leaves only that field empty.
    pub fn extract(&self, html: &str) -> Extraction {
        let document = Html::parse_document(html);
        Extraction {
            product_name: first_text(&document, &self.product_name)
                .map(|name| deunicode::deunicode(&name))
                .unwrap_or_default(),
            unit_price: first_text(&document, &self.unit_price).unwrap_or_default(),
            comparison_price: first_text(&document, &self.comparison_price).unwrap_or_default(),
        }
    }
}

fn first_text(document: &Html, selector: &Selector) -> Option<String> {
    document
        .select(selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
}

/// GET a page body with the shared blocking client.
pub fn fetch(client: &reqwest::blocking::Client, url: &str) -> Result<String, ExtractError> {
    let transport = |source| ExtractError::Transport {
        url: url.to_string(),
        source,
    };
    let response = client.get(url).send().map_err(transport)?;
    let status = response.status();
    if !status.is_success() {
        return Err(ExtractError::Status {
            url: url.to_string(),
            status,
        });
    }
    response.text().map_err(transport)
}
