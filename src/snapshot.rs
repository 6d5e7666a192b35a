use chrono::FixedOffset;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::error;

use crate::clock;
use crate::records::{RawRecord, SourceEntry};
use crate::retailer::Scraper;

/// Scrape every entry in order, producing exactly one record per entry.
///
/// Failed extractions are logged with their full cause chain and kept as
/// records whose name and price fields are empty.
pub fn build(entries: &[SourceEntry], scraper: &dyn Scraper, offset: FixedOffset) -> Vec<RawRecord> {
    let pb = ProgressBar::new(entries.len() as u64);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("[{elapsed_precise}] {bar:40} {pos}/{len} ({per_sec}, eta {eta})")
    {
        pb.set_style(style.progress_chars("=> "));
    }

    let mut records = Vec::with_capacity(entries.len());
    for entry in entries {
        let extraction = match scraper.extract(entry) {
            Ok(extraction) => extraction,
            Err(e) => {
                let e = anyhow::Error::new(e);
                error!(url = %entry.url, "Exception occurred when scraping link {}: {:?}", entry.url, e);
                Default::default()
            }
        };

        records.push(RawRecord {
            timestamp: clock::stamp(&clock::now(offset)),
            chain_id: scraper.chain_id().to_string(),
            category: entry.category.clone(),
            product_name: extraction.product_name,
            unit_price: extraction.unit_price,
            comparison_price: extraction.comparison_price,
        });
        pb.inc(1);
    }

    pb.finish_and_clear();
    records
}
