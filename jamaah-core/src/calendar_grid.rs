//! Month grid pairing each Gregorian day with its Hijri day.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::Serialize;

use crate::error::{CoreError, CoreResult};
use crate::hijri::{HijriDate, resolve_boundary_day};

/// One day in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayCell {
    pub date: NaiveDate,
    /// Raw tabular conversion, possibly with day 0 at a month boundary
    pub hijri: HijriDate,
    /// Hijri day number to display
    pub hijri_day: u32,
}

/// A Gregorian month laid out in weeks. Cells outside the month are `None`.
#[derive(Debug, Clone, Serialize)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    pub week_start: Weekday,
    pub weeks: Vec<[Option<DayCell>; 7]>,
}

impl MonthGrid {
    pub fn build(year: i32, month: u32, week_start: Weekday, hijri_offset: i64) -> CoreResult<Self> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| CoreError::InvalidDate(format!("{year:04}-{month:02}")))?;

        let leading = (first.weekday().num_days_from_sunday() + 7
            - week_start.num_days_from_sunday())
            % 7;

        let mut cells: Vec<Option<DayCell>> = vec![None; leading as usize];
        cells.extend(
            first
                .iter_days()
                .take_while(|d| d.month() == month)
                .map(|date| {
                    let hijri = HijriDate::from_gregorian(date, hijri_offset);
                    Some(DayCell {
                        date,
                        hijri,
                        hijri_day: 0,
                    })
                }),
        );
        while cells.len() % 7 != 0 {
            cells.push(None);
        }

        let weeks = cells
            .chunks(7)
            .map(|chunk| {
                let mut week = [None; 7];
                week.copy_from_slice(chunk);
                resolve_week(&mut week);
                week
            })
            .collect();

        Ok(MonthGrid {
            year,
            month,
            week_start,
            weeks,
        })
    }

    /// Column headers in display order.
    pub fn weekdays(&self) -> [Weekday; 7] {
        let mut days = [self.week_start; 7];
        for i in 1..7 {
            days[i] = days[i - 1].succ();
        }
        days
    }

    pub fn cells(&self) -> impl Iterator<Item = &DayCell> {
        self.weeks.iter().flatten().flatten()
    }

    pub fn cell(&self, date: NaiveDate) -> Option<&DayCell> {
        self.cells().find(|c| c.date == date)
    }

    /// Hijri month(s) covered, e.g. "Rajab – Sha'ban 1445".
    pub fn hijri_span(&self) -> String {
        let (Some(first), Some(last)) = (self.cells().next(), self.cells().last()) else {
            return String::new();
        };
        let start = first.hijri.normalized();
        let end = last.hijri.normalized();

        if (start.year, start.month) == (end.year, end.month) {
            format!("{} {}", start.month_name(), start.year)
        } else if start.year == end.year {
            format!("{} – {} {}", start.month_name(), end.month_name(), end.year)
        } else {
            format!(
                "{} {} – {} {}",
                start.month_name(),
                start.year,
                end.month_name(),
                end.year
            )
        }
    }
}

/// Fill in display days for one week, resolving boundary artifacts against the
/// other cells in the same row.
fn resolve_week(week: &mut [Option<DayCell>; 7]) {
    let raw: Vec<i32> = week.iter().map(|c| c.map_or(-1, |c| c.hijri.day)).collect();

    for (i, cell) in week.iter_mut().enumerate() {
        if let Some(cell) = cell {
            let neighbours: Vec<i32> = raw
                .iter()
                .enumerate()
                .filter(|&(j, &d)| j != i && d >= 0)
                .map(|(_, &d)| d)
                .collect();
            cell.hijri_day = resolve_boundary_day(cell.hijri.day, &neighbours);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn layout_with_sunday_start() {
        // 1 Feb 2024 is a Thursday
        let grid = MonthGrid::build(2024, 2, Weekday::Sun, 0).unwrap();
        assert_eq!(grid.weeks.len(), 5);
        assert!(grid.weeks[0][3].is_none());
        assert_eq!(grid.weeks[0][4].unwrap().date, date(2024, 2, 1));
        assert_eq!(grid.cells().count(), 29);
        assert_eq!(grid.weekdays()[0], Weekday::Sun);
        assert_eq!(grid.weekdays()[6], Weekday::Sat);
    }

    #[test]
    fn layout_with_monday_start() {
        let grid = MonthGrid::build(2024, 9, Weekday::Mon, 0).unwrap();
        // 1 Sep 2024 is a Sunday: last column of the first row
        assert_eq!(grid.weeks[0][6].unwrap().date, date(2024, 9, 1));
        assert_eq!(grid.weeks.len(), 6);
        assert_eq!(grid.weekdays()[6], Weekday::Sun);
    }

    #[test]
    fn boundary_day_follows_twenty_ninth_in_same_week() {
        let grid = MonthGrid::build(2024, 2, Weekday::Sun, 0).unwrap();
        let cell = grid.cell(date(2024, 2, 10)).unwrap();
        assert_eq!(cell.hijri.day, 0);
        assert_eq!(cell.hijri_day, 30);
        assert_eq!(grid.cell(date(2024, 2, 11)).unwrap().hijri_day, 1);
    }

    #[test]
    fn boundary_day_at_week_start_falls_back_to_twenty_nine() {
        // With Saturday-first weeks, 10 Feb 2024 opens its row and the 29th is in the row above
        let grid = MonthGrid::build(2024, 2, Weekday::Sat, 0).unwrap();
        assert_eq!(grid.cell(date(2024, 2, 10)).unwrap().hijri_day, 29);
    }

    #[test]
    fn every_cell_has_a_displayable_day() {
        for month in 1..=12 {
            let grid = MonthGrid::build(2025, month, Weekday::Sun, 0).unwrap();
            assert!(grid.cells().all(|c| (1..=30).contains(&c.hijri_day)));
        }
    }

    #[test]
    fn hijri_offset_shifts_cells() {
        let grid = MonthGrid::build(2024, 3, Weekday::Sun, 1).unwrap();
        assert_eq!(grid.cell(date(2024, 3, 10)).unwrap().hijri, HijriDate::new(1445, 9, 1));
    }

    #[test]
    fn header_spans_two_hijri_months() {
        let grid = MonthGrid::build(2024, 2, Weekday::Sun, 0).unwrap();
        assert_eq!(grid.hijri_span(), "Rajab – Sha'ban 1445");
    }

    #[test]
    fn header_spans_hijri_new_year() {
        let grid = MonthGrid::build(2024, 7, Weekday::Sun, 0).unwrap();
        assert_eq!(grid.hijri_span(), "Dhu al-Hijjah 1445 – Muharram 1446");
    }

    #[test]
    fn invalid_month_is_rejected() {
        assert!(MonthGrid::build(2024, 13, Weekday::Sun, 0).is_err());
    }
}
