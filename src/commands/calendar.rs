use anyhow::Result;
use chrono::Datelike;
use jamaah_core::calendar_grid::MonthGrid;
use jamaah_core::jamaah::Jamaah;

use crate::dates::parse_month;
use crate::render::render_month;

pub fn run(jamaah: &Jamaah, month: Option<&str>) -> Result<()> {
    let today = jamaah.today()?;
    let (year, month) = match month {
        Some(m) => parse_month(m)?,
        None => (today.year(), today.month()),
    };

    let grid = MonthGrid::build(year, month, jamaah.week_start()?, jamaah.hijri_offset())?;
    println!("{}", render_month(&grid, today));

    Ok(())
}
