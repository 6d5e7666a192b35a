use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("failed to read source list {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("source list line {line} is malformed (expected `url;category`, got {content:?})")]
    Malformed { line: usize, content: String },
    #[error("failed to decode source list line {line}")]
    Csv {
        line: usize,
        #[source]
        source: csv::Error,
    },
}

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("request to {url} failed")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} answered with HTTP {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
    #[error("{url} contains none of the expected product markup")]
    MarkupMissing { url: String },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Load(#[from] config::ConfigError),
    #[error("invalid setting `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("failed to write snapshot {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode snapshot {path:?}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}
