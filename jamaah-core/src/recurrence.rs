//! Recurrence rules for community schedules.
//!
//! A policy decides whether a schedule falls on a given calendar day. All interval
//! arithmetic is measured from the policy's anchor (the day the schedule record was
//! created), so callers supply both `today` and the stored anchor. Nothing in this
//! module reads the clock.

use std::fmt;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// How often a schedule repeats, as stored on the record.
///
/// Unknown strings are kept as `Other` rather than rejected; they fall back to
/// the weekday filter only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Frequency {
    Daily,
    Weekly,
    /// Older records use this name for a weekly schedule with an explicit day list
    TwiceWeek,
    /// Every 14 days from the anchor
    MonthTwice,
    Monthly,
    /// Every third month on the anchor's day of month
    Quarter,
    Yearly,
    Other(String),
}

impl Frequency {
    /// Parse a stored frequency. Blank strings mean "no frequency set".
    pub fn parse(s: &str) -> Option<Self> {
        if s.trim().is_empty() {
            None
        } else {
            Some(Frequency::from(s))
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
            Frequency::TwiceWeek => "twice_week",
            Frequency::MonthTwice => "month_twice",
            Frequency::Monthly => "monthly",
            Frequency::Quarter => "quarter",
            Frequency::Yearly => "yearly",
            Frequency::Other(s) => s,
        }
    }

    fn is_weekly(&self) -> bool {
        matches!(self, Frequency::Weekly | Frequency::TwiceWeek)
    }
}

impl From<&str> for Frequency {
    fn from(s: &str) -> Self {
        let trimmed = s.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "daily" => Frequency::Daily,
            "weekly" => Frequency::Weekly,
            "twice_week" => Frequency::TwiceWeek,
            "month_twice" => Frequency::MonthTwice,
            "monthly" => Frequency::Monthly,
            "quarter" => Frequency::Quarter,
            "yearly" => Frequency::Yearly,
            _ => Frequency::Other(trimmed.to_string()),
        }
    }
}

impl From<String> for Frequency {
    fn from(s: String) -> Self {
        Frequency::from(s.as_str())
    }
}

impl From<Frequency> for String {
    fn from(f: Frequency) -> Self {
        f.as_str().to_string()
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse an English weekday name ("Friday", "fri"), case-insensitive.
pub fn parse_weekday(name: &str) -> Option<Weekday> {
    name.trim().parse::<Weekday>().ok()
}

/// Full English name of a weekday, as stored in schedule records.
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Sun => "Sunday",
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
    }
}

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in a Gregorian month (1-based month).
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 31,
    }
}

/// Whole calendar months from `from` to `to` (negative if `to` is earlier).
pub fn month_diff(from: NaiveDate, to: NaiveDate) -> i32 {
    (to.year() - from.year()) * 12 + (to.month() as i32 - from.month() as i32)
}

/// A recurrence policy with its anchor date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecurrencePolicy {
    pub frequency: Option<Frequency>,
    /// Explicit weekdays. When non-empty this overrides weekly slot selection and
    /// filters every interval-based frequency.
    pub days: Vec<Weekday>,
    pub anchor: NaiveDate,
}

impl RecurrencePolicy {
    pub fn new(frequency: Option<Frequency>, days: Vec<Weekday>, anchor: NaiveDate) -> Self {
        RecurrencePolicy {
            frequency,
            days,
            anchor,
        }
    }

    /// Whether the schedule occurs on `today`.
    ///
    /// Rules, in priority order:
    /// - explicit days with no frequency or a weekly frequency: today's weekday is listed
    /// - weekly without days: the anchor's weekday, and the weekday three days after it
    /// - `month_twice`: every 14 days from the anchor
    /// - `quarter`: every third month on the anchor's day of month, clamped to short months
    /// - `monthly` / `yearly`: every month / every twelfth month on the clamped anchor day
    /// - no frequency and no days: every day
    /// - `daily` and unknown frequencies: every day the weekday filter allows
    ///
    /// Interval rules are never due before the anchor.
    pub fn is_due(&self, today: NaiveDate) -> bool {
        let due = self.evaluate(today);
        debug!(
            frequency = self.frequency.as_ref().map(Frequency::as_str).unwrap_or("-"),
            anchor = %self.anchor,
            %today,
            due,
            "evaluated recurrence"
        );
        due
    }

    fn evaluate(&self, today: NaiveDate) -> bool {
        let weekday_allowed = self.days.is_empty() || self.days.contains(&today.weekday());

        let Some(frequency) = &self.frequency else {
            return weekday_allowed;
        };

        match frequency {
            f if f.is_weekly() => {
                if !self.days.is_empty() {
                    return weekday_allowed;
                }
                let base = self.anchor.weekday().num_days_from_sunday();
                let second = (base + 3) % 7;
                let current = today.weekday().num_days_from_sunday();
                current == base || current == second
            }
            Frequency::MonthTwice => {
                let days_diff = (today - self.anchor).num_days();
                days_diff >= 0 && days_diff % 14 == 0 && weekday_allowed
            }
            Frequency::Quarter => self.on_anchor_day(today, 3) && weekday_allowed,
            Frequency::Monthly => self.on_anchor_day(today, 1) && weekday_allowed,
            Frequency::Yearly => self.on_anchor_day(today, 12) && weekday_allowed,
            _ => weekday_allowed,
        }
    }

    /// True when `today` is a whole multiple of `every_months` after the anchor month
    /// and falls on the anchor's day of month (clamped to the length of today's month).
    fn on_anchor_day(&self, today: NaiveDate, every_months: i32) -> bool {
        let months = month_diff(self.anchor, today);
        if months < 0 || months % every_months != 0 {
            return false;
        }
        let target_day = self.anchor.day().min(days_in_month(today.year(), today.month()));
        today.day() == target_day
    }
}
