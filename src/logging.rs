use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing::Subscriber;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

/// Errors go to an append-only log file. A stderr layer is added only when
/// `RUST_LOG` is set, so stack traces stay off the console by default.
pub fn init(error_log: &Path) -> Result<()> {
    let file = open(error_log)?;
    let stderr_layer = EnvFilter::try_from_default_env()
        .ok()
        .map(|filter| fmt::layer().with_writer(std::io::stderr).with_filter(filter));

    tracing_subscriber::registry()
        .with(file_layer(file))
        .with(stderr_layer)
        .try_init()
        .context("Failed to install tracing subscriber")
}

fn open(error_log: &Path) -> Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(error_log)
        .with_context(|| format!("Failed to open error log {:?}", error_log))
}

fn file_layer<S>(file: File) -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .with_filter(LevelFilter::ERROR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::{error, info};

    #[test]
    fn file_keeps_errors_only_and_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.txt");
        std::fs::write(&path, "earlier run\n").unwrap();

        let subscriber = tracing_subscriber::registry().with(file_layer(open(&path).unwrap()));
        tracing::subscriber::with_default(subscriber, || {
            info!("Running scraper.");
            error!("Exception occurred when scraping link https://x.test/1");
        });

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "earlier run");
        assert!(lines[1].contains("ERROR"));
        assert!(lines[1].contains("pricegatherer::logging::tests"));
        assert!(lines[1].contains("https://x.test/1"));
        assert!(!text.contains("Running scraper."));
    }
}
