use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{FixedOffset, Offset, Utc};
use serde::Deserialize;

use crate::errors::ConfigError;

const ENV_PREFIX: &str = "PRICEGATHERER";
const DEFAULT_FILE: &str = "pricegatherer";

/// Run-wide settings, resolved once at startup and passed down explicitly.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub source_list_path: PathBuf,
    pub test_mode_immediate_run: bool,
    pub schedule_hour: u32,
    pub output_directory: PathBuf,
    pub error_log_path: PathBuf,
    pub utc_offset_hours: i32,
    pub misfire_grace_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            source_list_path: PathBuf::from("seurattavat_tuotteet_SRYHMA.csv"),
            test_mode_immediate_run: true,
            schedule_hour: 0,
            output_directory: PathBuf::from("."),
            error_log_path: PathBuf::from("log.txt"),
            utc_offset_hours: 3,
            misfire_grace_secs: 20,
        }
    }
}

impl Settings {
    /// Layer defaults, then a config file, then `PRICEGATHERER_*` env vars.
    ///
    /// Without an explicit path, `pricegatherer.{toml,json,yaml,..}` in the
    /// working directory is picked up when present.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match path {
            Some(p) => config::File::from(p).required(true),
            None => config::File::with_name(DEFAULT_FILE).required(false),
        };
        let settings: Settings = config::Config::builder()
            .add_source(file)
            .add_source(config::Environment::with_prefix(ENV_PREFIX))
            .build()?
            .try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.schedule_hour > 23 {
            return Err(ConfigError::Invalid {
                key: "schedule_hour",
                reason: format!("{} is not an hour of the day", self.schedule_hour),
            });
        }
        if !(-23..=23).contains(&self.utc_offset_hours) {
            return Err(ConfigError::Invalid {
                key: "utc_offset_hours",
                reason: format!("{} is out of range", self.utc_offset_hours),
            });
        }
        Ok(())
    }

    pub fn offset(&self) -> FixedOffset {
        // validate() keeps the offset within chrono's accepted range
        FixedOffset::east_opt(self.utc_offset_hours * 3600)
            .unwrap_or_else(|| Utc.fix())
    }

    pub fn misfire_grace(&self) -> Duration {
        Duration::from_secs(self.misfire_grace_secs)
    }
}
