//! Loaded jamaah settings with paths expanded and values parsed.

use std::path::{Path, PathBuf};

use chrono::{NaiveDate, Utc, Weekday};
use chrono_tz::Tz;
use config::{Config, Environment, File};

use crate::constants::MAX_HIJRI_OFFSET;
use crate::error::{CoreError, CoreResult};
use crate::jamaah_config::JamaahConfig;
use crate::qibla::GeoPoint;
use crate::recurrence::parse_weekday;

#[derive(Debug, Clone)]
pub struct Jamaah {
    config: JamaahConfig,
    path: PathBuf,
}

impl Jamaah {
    /// Load ~/.config/jamaah/config.toml, creating a commented default on first run.
    pub fn load() -> CoreResult<Self> {
        let config_path = JamaahConfig::config_path()?;

        if !config_path.exists() {
            JamaahConfig::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    /// Load from an explicit file, layering `JAMAAH_*` environment variables on top.
    pub fn load_from(path: &Path) -> CoreResult<Self> {
        let config: JamaahConfig = Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .add_source(
                Environment::with_prefix("JAMAAH")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| CoreError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| CoreError::Config(e.to_string()))?;

        let jamaah = Jamaah {
            config,
            path: path.to_path_buf(),
        };
        jamaah.validate()?;
        Ok(jamaah)
    }

    pub fn from_config(config: JamaahConfig, path: PathBuf) -> CoreResult<Self> {
        let jamaah = Jamaah { config, path };
        jamaah.validate()?;
        Ok(jamaah)
    }

    fn validate(&self) -> CoreResult<()> {
        self.timezone()?;
        self.week_start()?;
        self.location()?;
        if !(-MAX_HIJRI_OFFSET..=MAX_HIJRI_OFFSET).contains(&self.config.hijri_offset) {
            return Err(CoreError::Config(format!(
                "hijri_offset {} is outside ±{MAX_HIJRI_OFFSET} days",
                self.config.hijri_offset
            )));
        }
        Ok(())
    }

    pub fn config(&self) -> &JamaahConfig {
        &self.config
    }

    pub fn config_path(&self) -> &Path {
        &self.path
    }

    pub fn schedules_path(&self) -> PathBuf {
        expand(&self.config.schedules_file)
    }

    pub fn sent_path(&self) -> PathBuf {
        expand(&self.config.sent_file)
    }

    pub fn timezone(&self) -> CoreResult<Tz> {
        self.config.timezone.parse::<Tz>().map_err(|_| {
            CoreError::Config(format!("Unknown time zone '{}'", self.config.timezone))
        })
    }

    pub fn week_start(&self) -> CoreResult<Weekday> {
        parse_weekday(&self.config.week_start).ok_or_else(|| {
            CoreError::Config(format!("Unknown week_start '{}'", self.config.week_start))
        })
    }

    pub fn location(&self) -> CoreResult<Option<GeoPoint>> {
        self.config
            .location
            .map(|p| GeoPoint::validated(p.latitude, p.longitude))
            .transpose()
    }

    pub fn hijri_offset(&self) -> i64 {
        self.config.hijri_offset
    }

    pub fn alignment_threshold(&self) -> f64 {
        self.config.alignment_threshold
    }

    /// Current calendar day in the configured time zone.
    ///
    /// This is the only clock read; everything downstream takes the day as input.
    pub fn today(&self) -> CoreResult<NaiveDate> {
        Ok(Utc::now().with_timezone(&self.timezone()?).date_naive())
    }

    /// Remember a default location and write the config back.
    pub fn set_location(&mut self, location: GeoPoint) -> CoreResult<()> {
        self.config.location = Some(location);
        self.config.save_to(&self.path)
    }
}

fn expand(path: &Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned())
}
