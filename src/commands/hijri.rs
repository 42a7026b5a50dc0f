use anyhow::Result;
use chrono::Datelike;
use jamaah_core::hijri::{HijriDate, gregorian_to_jdn};
use jamaah_core::jamaah::Jamaah;
use owo_colors::OwoColorize;

use super::resolve_day;
use crate::render::Render;

pub fn run(jamaah: &Jamaah, date: Option<&str>, from_hijri: Option<&str>) -> Result<()> {
    let offset = jamaah.hijri_offset();

    if let Some(label) = from_hijri {
        let hijri: HijriDate = label.parse()?;
        // Undo the local offset so the label means the same day it does on the calendar
        let gregorian = hijri.to_gregorian_with_offset(offset)?;
        println!("{}  =  {}", hijri.render(), gregorian.format("%A %-d %B %Y").bold());
        return Ok(());
    }

    let day = resolve_day(jamaah, date)?;
    let hijri = HijriDate::from_gregorian(day, offset);
    let jdn = gregorian_to_jdn(day.year(), day.month(), day.day());

    println!("{}  =  {}", day.format("%A %-d %B %Y").bold(), hijri.render());
    if offset != 0 {
        println!("{}", format!("hijri_offset {offset:+} day(s) applied").dimmed());
    }
    println!("{}", format!("JDN {jdn}").dimmed());

    Ok(())
}
