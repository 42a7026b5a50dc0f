//! Global jamaah configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_ALIGNMENT_THRESHOLD;
use crate::error::{CoreError, CoreResult};
use crate::qibla::GeoPoint;

static DEFAULT_SCHEDULES_FILE: &str = "~/jamaah/schedules.json";
static DEFAULT_SENT_FILE: &str = "~/jamaah/notified.json";
static DEFAULT_TIMEZONE: &str = "UTC";
static DEFAULT_WEEK_START: &str = "Sunday";

fn default_schedules_file() -> PathBuf {
    PathBuf::from(DEFAULT_SCHEDULES_FILE)
}

fn default_sent_file() -> PathBuf {
    PathBuf::from(DEFAULT_SENT_FILE)
}

fn default_timezone() -> String {
    DEFAULT_TIMEZONE.to_string()
}

fn default_week_start() -> String {
    DEFAULT_WEEK_START.to_string()
}

fn default_alignment_threshold() -> f64 {
    DEFAULT_ALIGNMENT_THRESHOLD
}

fn is_zero(n: &i64) -> bool {
    *n == 0
}

/// Global configuration at ~/.config/jamaah/config.toml
///
/// Every field can be overridden with a `JAMAAH_` environment variable
/// (`JAMAAH_TIMEZONE`, `JAMAAH_LOCATION__LATITUDE`, ...).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct JamaahConfig {
    /// Exported schedule collection (JSON array)
    #[serde(default = "default_schedules_file")]
    pub schedules_file: PathBuf,

    /// Keys of notifications already created
    #[serde(default = "default_sent_file")]
    pub sent_file: PathBuf,

    /// IANA time zone the community keeps its calendar in
    #[serde(default = "default_timezone")]
    pub timezone: String,

    /// Days to shift the tabular Hijri calendar for local moon sighting
    #[serde(default, skip_serializing_if = "is_zero")]
    pub hijri_offset: i64,

    #[serde(default = "default_week_start")]
    pub week_start: String,

    /// Degrees within which the compass counts as facing the Qibla
    #[serde(default = "default_alignment_threshold")]
    pub alignment_threshold: f64,

    /// Default location for Qibla direction. Kept last so it serializes as a trailing table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoPoint>,
}

impl Default for JamaahConfig {
    fn default() -> Self {
        JamaahConfig {
            schedules_file: default_schedules_file(),
            sent_file: default_sent_file(),
            timezone: default_timezone(),
            hijri_offset: 0,
            week_start: default_week_start(),
            alignment_threshold: default_alignment_threshold(),
            location: None,
        }
    }
}

impl JamaahConfig {
    pub fn config_path() -> CoreResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CoreError::Config("Could not determine config directory".into()))?
            .join("jamaah");

        Ok(config_dir.join("config.toml"))
    }

    /// Save the config to `path`.
    pub fn save_to(&self, path: &Path) -> CoreResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| CoreError::Config(e.to_string()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                CoreError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, content)
            .map_err(|e| CoreError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> CoreResult<()> {
        let contents = format!(
            "\
# jamaah configuration

# Exported schedule records (JSON array):
# schedules_file = \"{DEFAULT_SCHEDULES_FILE}\"

# Where keys of sent notifications are kept:
# sent_file = \"{DEFAULT_SENT_FILE}\"

# Time zone used to decide which calendar day it is:
# timezone = \"Asia/Jakarta\"

# First column of the calendar grid:
# week_start = \"{DEFAULT_WEEK_START}\"

# Shift the Hijri calendar to match local moon sighting (days):
# hijri_offset = 0

# Tolerance for the Qibla compass (degrees):
# alignment_threshold = {DEFAULT_ALIGNMENT_THRESHOLD:.1}

# Default location for Qibla direction:
# [location]
# latitude = -6.2088
# longitude = 106.8456
"
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                CoreError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| CoreError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
