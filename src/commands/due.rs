use anyhow::Result;
use jamaah_core::hijri::HijriDate;
use jamaah_core::jamaah::Jamaah;
use jamaah_core::schedule::Evaluator;
use owo_colors::OwoColorize;

use super::{load_schedules, resolve_day, title_for};
use crate::render::{Render, date_label};

pub fn run(jamaah: &Jamaah, date: Option<&str>, json: bool) -> Result<()> {
    let today = jamaah.today()?;
    let day = resolve_day(jamaah, date)?;
    let records = load_schedules(jamaah)?;

    let report = Evaluator::new(day, jamaah.timezone()?).evaluate(&records);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let hijri = HijriDate::from_gregorian(day, jamaah.hijri_offset());
    println!(
        "{}  {}  {}",
        date_label(day, today).bold(),
        day.format("%A %-d %B %Y").dimmed(),
        hijri.render()
    );

    if report.due.is_empty() {
        println!("   {}", "Nothing scheduled".dimmed());
    }
    for id in &report.due {
        println!("   {} {}", "•".green(), title_for(&records, id));
    }

    if !report.invalid.is_empty() {
        println!();
        println!("   {}", "Skipped (fix these records):".yellow());
        for invalid in &report.invalid {
            println!("   {} {} {}", "!".yellow(), invalid.id, invalid.reason.dimmed());
        }
    }

    Ok(())
}
