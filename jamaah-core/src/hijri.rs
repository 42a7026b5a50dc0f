//! Gregorian and tabular Hijri conversion through the Julian Day Number.
//!
//! The Hijri side is the arithmetic (30-year cycle) calendar, not an observed
//! moon-sighting calendar. Month lengths come from the mean lunar month of 29.5
//! days, so dates near a month boundary can be a day off from a local
//! announcement. That error is accepted; [`resolve_boundary_day`] handles the one
//! place where it shows up as an impossible day number.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::constants::{GREGORIAN_REFORM_JDN, ISLAMIC_EPOCH_OFFSET};
use crate::error::{CoreError, CoreResult};

const HIJRI_MONTH_NAMES: [&str; 12] = [
    "Muharram",
    "Safar",
    "Rabi' al-Awwal",
    "Rabi' al-Thani",
    "Jumada al-Ula",
    "Jumada al-Akhirah",
    "Rajab",
    "Sha'ban",
    "Ramadan",
    "Shawwal",
    "Dhu al-Qi'dah",
    "Dhu al-Hijjah",
];

/// English transliteration of a Hijri month (1-based).
pub fn hijri_month_name(month: u32) -> &'static str {
    match month {
        1..=12 => HIJRI_MONTH_NAMES[month as usize - 1],
        _ => "Unknown",
    }
}

/// Julian Day Number of a proleptic Gregorian date.
pub fn gregorian_to_jdn(year: i32, month: u32, day: u32) -> i64 {
    let (year, month, day) = (i64::from(year), i64::from(month), i64::from(day));
    let a = (14 - month).div_euclid(12);
    let y = year + 4800 - a;
    let m = month + 12 * a - 3;
    day + (153 * m + 2).div_euclid(5) + 365 * y + y.div_euclid(4) - y.div_euclid(100)
        + y.div_euclid(400)
        - 32045
}

/// Calendar date for a Julian Day Number.
///
/// Days before the Gregorian reform (JDN 2299161) are returned in the Julian
/// calendar, so they do not round-trip through [`gregorian_to_jdn`].
pub fn jdn_to_gregorian(jdn: i64) -> (i32, u32, u32) {
    let a = if jdn >= GREGORIAN_REFORM_JDN {
        let alpha = (4 * jdn - 7_468_865).div_euclid(146_097);
        jdn + 1 + alpha - alpha.div_euclid(4)
    } else {
        jdn
    };
    let b = a + 1524;
    let c = (20 * b - 2442).div_euclid(7305);
    let d = (1461 * c).div_euclid(4);
    let e = (10_000 * (b - d)).div_euclid(306_001);

    let day = b - d - (306_001 * e).div_euclid(10_000);
    let month = if e < 14 { e - 1 } else { e - 13 };
    let year = if month > 2 { c - 4716 } else { c - 4715 };

    (year as i32, month as u32, day as u32)
}

/// `ceil(29.5 * months)` in integers.
fn lunar_days_before(months: i64) -> i64 {
    (59 * months + 1).div_euclid(2)
}

/// Julian Day Number of a tabular Hijri date.
///
/// `day` may be 0 (the artifact [`jdn_to_islamic`] produces); it encodes the
/// last day of the previous month.
pub fn islamic_to_jdn(year: i32, month: u32, day: i32) -> i64 {
    let year = i64::from(year);
    i64::from(day)
        + lunar_days_before(i64::from(month) - 1)
        + (year - 1) * 354
        + (3 + 11 * year).div_euclid(30)
        + ISLAMIC_EPOCH_OFFSET
}

/// Tabular Hijri date for a Julian Day Number.
///
/// The month is taken as `ceil(day_of_year / 29.5)`, which puts the 30th day of a
/// 30-day month into the next month as day `0`. [`islamic_to_jdn`] maps that back
/// to the same JDN; display code goes through [`resolve_boundary_day`].
pub fn jdn_to_islamic(jdn: i64) -> HijriDate {
    let mut year = (30 * (jdn - ISLAMIC_EPOCH_OFFSET - 1) + 10_646).div_euclid(10_631);
    // The cycle estimate can land one year late; step back rather than emit a negative day.
    while jdn < islamic_to_jdn(year as i32, 1, 1) {
        year -= 1;
    }
    let year = year as i32;

    let day_of_year = jdn - islamic_to_jdn(year, 1, 1) + 1;
    let month = ((2 * day_of_year + 58).div_euclid(59)).clamp(1, 12) as u32;
    let day = (jdn - islamic_to_jdn(year, month, 1) + 1) as i32;

    HijriDate { year, month, day }
}

/// Display value for a Hijri day that came out as 0 at a month boundary.
///
/// `week` holds the raw Hijri day numbers of the other cells in the same displayed
/// week. If one of them is 29, this cell follows a 29th and shows 30; otherwise it
/// shows 29. Days already in range are returned as-is.
pub fn resolve_boundary_day(raw_day: i32, week: &[i32]) -> u32 {
    if raw_day > 0 {
        return raw_day as u32;
    }
    if week.contains(&29) { 30 } else { 29 }
}

/// A tabular Hijri date. `day` is 0 only for the month-boundary artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HijriDate {
    pub year: i32,
    pub month: u32,
    pub day: i32,
}

impl HijriDate {
    pub fn new(year: i32, month: u32, day: i32) -> Self {
        HijriDate { year, month, day }
    }

    /// Convert a Gregorian date, shifted by `offset_days` for local moon sighting
    /// (positive when the community is ahead of the tabular calendar).
    pub fn from_gregorian(date: NaiveDate, offset_days: i64) -> Self {
        jdn_to_islamic(gregorian_to_jdn(date.year(), date.month(), date.day()) + offset_days)
    }

    /// Gregorian day this date falls on when the calendar runs `offset_days` ahead.
    pub fn to_gregorian_with_offset(&self, offset_days: i64) -> CoreResult<NaiveDate> {
        HijriDate::gregorian_for_jdn(self.to_jdn() - offset_days)
    }

    pub fn to_jdn(&self) -> i64 {
        islamic_to_jdn(self.year, self.month, self.day)
    }

    pub fn to_gregorian(&self) -> CoreResult<NaiveDate> {
        HijriDate::gregorian_for_jdn(self.to_jdn())
    }

    fn gregorian_for_jdn(jdn: i64) -> CoreResult<NaiveDate> {
        let (y, m, d) = jdn_to_gregorian(jdn);
        NaiveDate::from_ymd_opt(y, m, d)
            .ok_or_else(|| CoreError::InvalidDate(format!("{y:04}-{m:02}-{d:02}")))
    }

    pub fn month_name(&self) -> &'static str {
        hijri_month_name(self.month)
    }

    /// Same day with the boundary artifact folded back into the previous month.
    pub fn normalized(&self) -> Self {
        if self.day > 0 {
            return *self;
        }
        jdn_to_islamic(self.to_jdn() - 1).next_day_of_month()
    }

    fn next_day_of_month(self) -> Self {
        HijriDate {
            day: self.day + 1,
            ..self
        }
    }
}

impl fmt::Display for HijriDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let date = self.normalized();
        write!(f, "{} {} {} AH", date.day, date.month_name(), date.year)
    }
}

/// Parses `DD-MM-YYYY`, the label format returned by prayer-time services.
impl FromStr for HijriDate {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CoreError::InvalidHijriLabel(s.to_string());
        let mut parts = s.trim().split(['-', '/']);
        let (Some(d), Some(m), Some(y), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid());
        };

        let day: i32 = d.parse().map_err(|_| invalid())?;
        let month: u32 = m.parse().map_err(|_| invalid())?;
        let year: i32 = y.parse().map_err(|_| invalid())?;

        if !(1..=12).contains(&month) || !(1..=30).contains(&day) || year < 1 {
            return Err(invalid());
        }
        Ok(HijriDate { year, month, day })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // --- Gregorian <-> JDN ---

    #[test]
    fn known_julian_day_numbers() {
        assert_eq!(gregorian_to_jdn(2000, 1, 1), 2_451_545);
        assert_eq!(gregorian_to_jdn(1582, 10, 15), GREGORIAN_REFORM_JDN);
        assert_eq!(gregorian_to_jdn(1970, 1, 1), 2_440_588);
    }

    #[test]
    fn gregorian_round_trip_1900_to_2100() {
        let mut d = date(1900, 1, 1);
        let end = date(2100, 12, 31);
        while d <= end {
            let jdn = gregorian_to_jdn(d.year(), d.month(), d.day());
            assert_eq!(jdn_to_gregorian(jdn), (d.year(), d.month(), d.day()), "{d}");
            d = d.succ_opt().unwrap();
        }
    }

    #[test]
    fn gregorian_jdn_strictly_increasing() {
        let mut d = date(1999, 12, 25);
        let mut prev = gregorian_to_jdn(d.year(), d.month(), d.day());
        for _ in 0..800 {
            d = d.succ_opt().unwrap();
            let jdn = gregorian_to_jdn(d.year(), d.month(), d.day());
            assert_eq!(jdn, prev + 1);
            prev = jdn;
        }
    }

    #[test]
    fn reform_boundary_switches_calendars() {
        assert_eq!(jdn_to_gregorian(GREGORIAN_REFORM_JDN), (1582, 10, 15));
        // Day before the reform is Julian 4 October
        assert_eq!(jdn_to_gregorian(GREGORIAN_REFORM_JDN - 1), (1582, 10, 4));
    }

    // --- Hijri <-> JDN ---

    #[test]
    fn hijri_epoch() {
        assert_eq!(islamic_to_jdn(1, 1, 1), 1_948_440);
        assert_eq!(jdn_to_gregorian(1_948_440), (622, 7, 16));
    }

    #[test]
    fn known_hijri_dates() {
        assert_eq!(HijriDate::from_gregorian(date(2024, 3, 11), 0), HijriDate::new(1445, 9, 1));
        assert_eq!(HijriDate::from_gregorian(date(2024, 1, 1), 0), HijriDate::new(1445, 6, 19));
        assert_eq!(HijriDate::from_gregorian(date(2023, 7, 19), 0), HijriDate::new(1445, 1, 1));
    }

    #[test]
    fn hijri_round_trip_at_jdn_level() {
        for year in (1..1600).step_by(7) {
            for month in 1..=12 {
                for day in 1..=30 {
                    let jdn = islamic_to_jdn(year, month, day);
                    assert_eq!(jdn_to_islamic(jdn).to_jdn(), jdn, "{year}-{month}-{day}");
                }
            }
        }
    }

    #[test]
    fn every_day_round_trips_through_hijri() {
        let mut d = date(1900, 1, 1);
        while d <= date(2100, 12, 31) {
            let jdn = gregorian_to_jdn(d.year(), d.month(), d.day());
            let h = jdn_to_islamic(jdn);
            assert!((0..=30).contains(&h.day), "{d} -> {h:?}");
            assert_eq!(h.to_jdn(), jdn);
            d = d.succ_opt().unwrap();
        }
    }

    #[test]
    fn month_boundary_yields_day_zero() {
        // Tabular 30 Rajab 1445 lands on day 0 of Sha'ban
        let raw = HijriDate::from_gregorian(date(2024, 2, 10), 0);
        assert_eq!(raw, HijriDate::new(1445, 8, 0));
        assert_eq!(raw.normalized(), HijriDate::new(1445, 7, 30));
        assert_eq!(raw.to_string(), "30 Rajab 1445 AH");
    }

    #[test]
    fn offset_shifts_hijri_day() {
        let base = HijriDate::from_gregorian(date(2024, 3, 11), 0);
        let behind = HijriDate::from_gregorian(date(2024, 3, 11), -1);
        assert_eq!(base.to_jdn() - behind.to_jdn(), 1);
    }

    #[test]
    fn offset_round_trips_to_same_gregorian_day() {
        let day = date(2024, 3, 11);
        let shifted = HijriDate::from_gregorian(day, 2);
        assert_eq!(shifted, HijriDate::new(1445, 9, 3));
        assert_eq!(shifted.to_gregorian_with_offset(2).unwrap(), day);
    }

    #[test]
    fn out_of_range_gregorian_is_an_error() {
        let far = HijriDate::new(1_000_000, 1, 1);
        assert!(matches!(far.to_gregorian_with_offset(0), Err(CoreError::InvalidDate(_))));
    }

    #[test]
    fn hijri_to_gregorian() {
        assert_eq!(HijriDate::new(1445, 9, 1).to_gregorian().unwrap(), date(2024, 3, 11));
    }

    // --- boundary heuristic ---

    #[test]
    fn boundary_day_after_twenty_ninth_shows_thirty() {
        assert_eq!(resolve_boundary_day(0, &[25, 26, 27, 28, 29, 1]), 30);
    }

    #[test]
    fn boundary_day_without_neighbour_shows_twenty_nine() {
        assert_eq!(resolve_boundary_day(0, &[1, 2, 3, 4, 5, 6]), 29);
    }

    #[test]
    fn in_range_day_is_unchanged() {
        assert_eq!(resolve_boundary_day(17, &[29]), 17);
    }

    // --- labels ---

    #[test]
    fn parse_api_label() {
        let h: HijriDate = "01-09-1445".parse().unwrap();
        assert_eq!(h, HijriDate::new(1445, 9, 1));
        assert_eq!(h.month_name(), "Ramadan");
    }

    #[test]
    fn reject_bad_labels() {
        assert!("1445-09".parse::<HijriDate>().is_err());
        assert!("31-01-1445".parse::<HijriDate>().is_err());
        assert!("01-13-1445".parse::<HijriDate>().is_err());
        assert!("a-b-c".parse::<HijriDate>().is_err());
        assert!("01-01-1445-2".parse::<HijriDate>().is_err());
    }

    #[test]
    fn display_format() {
        assert_eq!(HijriDate::new(1445, 9, 15).to_string(), "15 Ramadan 1445 AH");
        assert_eq!(hijri_month_name(13), "Unknown");
    }
}
