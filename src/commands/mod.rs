pub mod backfill;
pub mod calendar;
pub mod config;
pub mod due;
pub mod hijri;
pub mod notify;
pub mod qibla;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use jamaah_core::jamaah::Jamaah;
use jamaah_core::schedule::{ScheduleRecord, load_records};

use crate::dates::day_or_today;

/// Resolve an optional day argument against today in the configured time zone.
pub fn resolve_day(jamaah: &Jamaah, input: Option<&str>) -> Result<NaiveDate> {
    let today = jamaah.today()?;
    day_or_today(input, today)
}

/// Load the exported schedule records, with a hint when the export is missing.
pub fn load_schedules(jamaah: &Jamaah) -> Result<Vec<ScheduleRecord>> {
    let path = jamaah.schedules_path();

    if !path.exists() {
        anyhow::bail!(
            "No schedule export found at {}.\n\n\
            Export the schedules collection as a JSON array and either save it there\n\
            or point schedules_file in {} at it.",
            path.display(),
            jamaah.config_path().display()
        );
    }

    load_records(&path).with_context(|| format!("Could not load schedules from {}", path.display()))
}

/// Title for a schedule id, falling back to the id itself.
pub fn title_for<'a>(records: &'a [ScheduleRecord], id: &'a str) -> &'a str {
    records
        .iter()
        .find(|r| r.id == id)
        .map(|r| r.title.trim())
        .filter(|t| !t.is_empty())
        .unwrap_or(id)
}
