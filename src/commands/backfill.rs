use anyhow::Result;
use jamaah_core::date_range::{DateRange, parse_date};
use jamaah_core::jamaah::Jamaah;
use jamaah_core::notification::{load_sent_keys, notifications_for};
use jamaah_core::schedule::Evaluator;
use owo_colors::OwoColorize;

use super::{load_schedules, title_for};
use crate::dates::parse_span_days;
use crate::render::date_label;

pub fn run(
    jamaah: &Jamaah,
    from: Option<&str>,
    to: Option<&str>,
    span: Option<&str>,
    json: bool,
) -> Result<()> {
    let today = jamaah.today()?;

    let range = match span {
        Some(span) => {
            let end = to.map(parse_date).transpose()?.unwrap_or(today);
            DateRange::spanning(parse_span_days(span)?, end)?
        }
        None => DateRange::from_args(from, to, today)?,
    };

    let records = load_schedules(jamaah)?;
    let sent = load_sent_keys(&jamaah.sent_path())?;

    let occurrences = Evaluator::new(today, jamaah.timezone()?).backfill(&records, &range, &sent);

    if json {
        let notifications = notifications_for(&occurrences, &records, &sent);
        println!("{}", serde_json::to_string_pretty(&notifications)?);
        return Ok(());
    }

    println!(
        "{}",
        format!(
            "Scanning {} to {} ({} days)",
            range.from,
            range.to,
            range.len_days()
        )
        .dimmed()
    );

    if occurrences.is_empty() {
        println!("{}", "Nothing missing".green());
        return Ok(());
    }

    // Group by day, as the scan returns them in date order
    let mut current = None;
    for occurrence in &occurrences {
        if current != Some(occurrence.date) {
            println!();
            println!("{}", date_label(occurrence.date, today).bold());
            current = Some(occurrence.date);
        }
        println!(
            "  {} {}",
            title_for(&records, &occurrence.schedule_id),
            format!("[{}]", occurrence.key()).dimmed()
        );
    }

    Ok(())
}
