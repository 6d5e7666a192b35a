use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::cleaner::{self, ValidationReport};
use crate::config::Settings;
use crate::retailer::{SRyhma, Scraper};
use crate::{clock, console, output, registry, snapshot};

pub struct RunOutcome {
    pub snapshot: PathBuf,
    pub rows: usize,
    pub report: ValidationReport,
}

/// One complete, self-contained run against the S-Group retailer.
pub fn run(settings: &Settings) -> Result<RunOutcome> {
    let scraper = SRyhma::new(reqwest::blocking::Client::new());
    run_with(settings, &scraper)
}

/// Load sources, scrape, clean and persist. Only a bad source list or a
/// failed write aborts the run; per-page failures become dropped rows.
pub fn run_with(settings: &Settings, scraper: &dyn Scraper) -> Result<RunOutcome> {
    let offset = settings.offset();
    console::log(offset, "Running scraper.");

    let entries = registry::load(&settings.source_list_path)
        .context("Source list could not be loaded")?;
    let raw = snapshot::build(&entries, scraper, offset);
    let (cleaned, report) = cleaner::clean(raw, &entries);
    report.print(offset);

    let date = clock::date_stamp(&clock::now(offset));
    let path = output::write_snapshot(&settings.output_directory, &date, &cleaned)?;
    console::log(offset, format!("Wrote {} rows to {}", cleaned.len(), path.display()));

    Ok(RunOutcome {
        snapshot: path,
        rows: cleaned.len(),
        report,
    })
}
