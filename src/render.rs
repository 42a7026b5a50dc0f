//! TUI rendering traits for jamaah-core types.
//!
//! Extension traits that add colored terminal rendering to core types using
//! owo_colors.

use chrono::{Datelike, NaiveDate, Weekday};
use jamaah_core::calendar_grid::MonthGrid;
use jamaah_core::hijri::HijriDate;
use jamaah_core::qibla::{Alignment, Qibla, compass_point};
use owo_colors::OwoColorize;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for HijriDate {
    fn render(&self) -> String {
        self.to_string().green().to_string()
    }
}

impl Render for Qibla {
    fn render(&self) -> String {
        format!(
            "{} {}  {}",
            format!("{:.1}°", self.bearing).bold(),
            compass_point(self.bearing),
            format!("{:.0} km to the Kaaba", self.distance_km).dimmed()
        )
    }
}

impl Render for Alignment {
    fn render(&self) -> String {
        match self {
            Alignment::Aligned => "Facing the Qibla".green().bold().to_string(),
            Alignment::TurnLeft(deg) => format!("Turn left {:.0}°", deg).yellow().to_string(),
            Alignment::TurnRight(deg) => format!("Turn right {:.0}°", deg).yellow().to_string(),
        }
    }
}

/// Format a date label (e.g. "Today", "Tomorrow", "Fri 5 Jan")
pub fn date_label(date: NaiveDate, today: NaiveDate) -> String {
    match (date - today).num_days() {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        -1 => "Yesterday".to_string(),
        _ => date.format("%a %-d %b").to_string(),
    }
}

fn weekday_abbrev(day: Weekday) -> &'static str {
    match day {
        Weekday::Sun => "Sun",
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
    }
}

/// Width of one grid column: "dd hh " plus padding
const CELL_WIDTH: usize = 8;

/// Render a month grid with Gregorian days and Hijri days in a smaller column.
/// Today is highlighted and Fridays are green.
pub fn render_month(grid: &MonthGrid, today: NaiveDate) -> String {
    let mut lines = Vec::new();

    let title = NaiveDate::from_ymd_opt(grid.year, grid.month, 1)
        .map(|d| d.format("%B %Y").to_string())
        .unwrap_or_default();
    lines.push(format!("{}  {}", title.bold(), grid.hijri_span().dimmed()));

    let header: String = grid
        .weekdays()
        .iter()
        .map(|d| format!("{:<width$}", weekday_abbrev(*d), width = CELL_WIDTH))
        .collect();
    lines.push(header.trim_end().dimmed().to_string());

    for week in &grid.weeks {
        let mut line = String::new();
        for cell in week {
            let Some(cell) = cell else {
                line.push_str(&" ".repeat(CELL_WIDTH));
                continue;
            };
            let greg = format!("{:>2}", cell.date.day());
            let greg = if cell.date == today {
                greg.reversed().to_string()
            } else if cell.date.weekday() == Weekday::Fri {
                greg.green().to_string()
            } else {
                greg
            };
            let hijri = format!("{:<2}", cell.hijri_day);
            line.push_str(&format!("{} {}   ", greg, hijri.dimmed()));
        }
        lines.push(line.trim_end().to_string());
    }

    lines.join("\n")
}
