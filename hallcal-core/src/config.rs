//! Global hallcal configuration.

use std::path::{Path, PathBuf};

use chrono_tz::Tz;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{HallError, HallResult};
use crate::store::LocalStore;

static DEFAULT_DATA_DIR: &str = "~/.local/share/hallcal";
static DEFAULT_CALENDAR_NAME: &str = "Village Hall";
static DEFAULT_TIMEZONE: &str = "Europe/London";

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}

fn default_calendar_name() -> String {
    DEFAULT_CALENDAR_NAME.to_string()
}

fn default_timezone() -> String {
    DEFAULT_TIMEZONE.to_string()
}

/// Configuration at ~/.config/hallcal/config.toml.
///
/// Every key can also be set from the environment as `HALLCAL_<KEY>`,
/// e.g. `HALLCAL_DATA_DIR`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct HallConfig {
    /// Where events.json and regular_activities.json live.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Calendar name used in exported .ics files.
    #[serde(default = "default_calendar_name")]
    pub calendar_name: String,

    /// IANA timezone the hall's local times are in.
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

impl Default for HallConfig {
    fn default() -> Self {
        HallConfig {
            data_dir: default_data_dir(),
            calendar_name: default_calendar_name(),
            timezone: default_timezone(),
        }
    }
}

impl HallConfig {
    pub fn config_path() -> HallResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| HallError::Config("Could not determine config directory".into()))?
            .join("hallcal");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the global config, writing a commented default file first if
    /// none exists yet.
    pub fn load() -> HallResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    /// Load from an explicit file (which may be missing) plus the environment.
    pub fn load_from(path: &Path) -> HallResult<Self> {
        let config: HallConfig = Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix("HALLCAL"))
            .build()
            .map_err(|e| HallError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| HallError::Config(e.to_string()))?;

        config.tz()?;
        Ok(config)
    }

    /// The data directory with `~` expanded.
    pub fn data_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.data_dir.to_string_lossy()).into_owned();

        PathBuf::from(full_path_str)
    }

    pub fn tz(&self) -> HallResult<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| HallError::Timezone(self.timezone.clone()))
    }

    pub fn open_store(&self) -> HallResult<LocalStore> {
        LocalStore::open(self.data_path())
    }

    /// The effective configuration as TOML.
    pub fn to_toml(&self) -> HallResult<String> {
        toml::to_string_pretty(self).map_err(|e| HallError::Config(e.to_string()))
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> HallResult<()> {
        let contents = format!(
            "\
# hallcal configuration

# Where event and activity records are stored:
# data_dir = \"{}\"

# Calendar name used in exported .ics files:
# calendar_name = \"{}\"

# Timezone for event and activity times:
# timezone = \"{}\"
",
            DEFAULT_DATA_DIR, DEFAULT_CALENDAR_NAME, DEFAULT_TIMEZONE
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                HallError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| HallError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
