//! Inclusive day ranges for backfill scans.

use chrono::{Duration, NaiveDate};

use crate::constants::DEFAULT_BACKFILL_DAYS;
use crate::error::{CoreError, CoreResult};

/// Inclusive range of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    pub fn new(from: NaiveDate, to: NaiveDate) -> CoreResult<Self> {
        if from > to {
            return Err(CoreError::InvalidDate(format!(
                "range start {from} is after range end {to}"
            )));
        }
        Ok(DateRange { from, to })
    }

    /// The `days` days up to and including `to`.
    pub fn spanning(days: i64, to: NaiveDate) -> CoreResult<Self> {
        if days < 1 {
            return Err(CoreError::InvalidDate(format!("span of {days} days")));
        }
        let from = to
            .checked_sub_signed(Duration::days(days - 1))
            .ok_or_else(|| CoreError::InvalidDate(format!("{days} days before {to}")))?;
        DateRange::new(from, to)
    }

    /// Build a range from optional YYYY-MM-DD strings.
    /// - `from` defaults to DEFAULT_BACKFILL_DAYS before `to`
    /// - `to` defaults to `today`
    pub fn from_args(from: Option<&str>, to: Option<&str>, today: NaiveDate) -> CoreResult<Self> {
        let to = match to {
            Some(s) => parse_date(s)?,
            None => today,
        };
        match from {
            Some(s) => DateRange::new(parse_date(s)?, to),
            None => DateRange::spanning(DEFAULT_BACKFILL_DAYS, to),
        }
    }

    pub fn len_days(&self) -> i64 {
        (self.to - self.from).num_days() + 1
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.from <= day && day <= self.to
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let to = self.to;
        self.from.iter_days().take_while(move |d| *d <= to)
    }
}

/// Parse YYYY-MM-DD
pub fn parse_date(s: &str) -> CoreResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
        CoreError::InvalidDate(format!("Invalid date format '{s}'. Expected YYYY-MM-DD"))
    })
}
