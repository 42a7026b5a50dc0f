//! Date arguments: ISO dates, a few relative words, and fuzzydate for the rest.

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};

/// Spell out weekday abbreviations ("fri", "thurs") so fuzzydate accepts them.
fn expand_weekdays(input: &str) -> String {
    input
        .to_lowercase()
        .split_whitespace()
        .map(|word| match word {
            "mon" => "monday",
            "tue" | "tues" => "tuesday",
            "wed" => "wednesday",
            "thu" | "thur" | "thurs" => "thursday",
            "fri" | "jum" => "friday",
            "sat" => "saturday",
            "sun" => "sunday",
            other => other,
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parse a day argument. `today` anchors the relative words so they agree with
/// the configured time zone.
pub fn parse_day(input: &str, today: NaiveDate) -> Result<NaiveDate> {
    let trimmed = input.trim();

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }

    let relative = match trimmed.to_lowercase().as_str() {
        "today" => Some(Some(today)),
        "tomorrow" => Some(today.succ_opt()),
        "yesterday" => Some(today.pred_opt()),
        _ => None,
    };
    if let Some(day) = relative {
        return day.with_context(|| format!("\"{}\" is outside the supported dates", input));
    }

    let expanded = expand_weekdays(trimmed);
    let dt = fuzzydate::parse(&expanded)
        .map_err(|_| anyhow::anyhow!("Could not parse date: \"{}\"", input))?;
    Ok(dt.date())
}

/// Parse an optional day argument, defaulting to `today`.
pub fn day_or_today(input: Option<&str>, today: NaiveDate) -> Result<NaiveDate> {
    input.map_or(Ok(today), |s| parse_day(s, today))
}

/// Parse YYYY-MM into (year, month).
pub fn parse_month(input: &str) -> Result<(i32, u32)> {
    let first = NaiveDate::parse_from_str(&format!("{}-01", input.trim()), "%Y-%m-%d")
        .with_context(|| format!("Invalid month '{}'. Expected YYYY-MM", input))?;
    Ok((first.year(), first.month()))
}

/// Number of whole days in a humantime span ("2weeks", "10days").
pub fn parse_span_days(input: &str) -> Result<i64> {
    let span = humantime::parse_duration(input)
        .with_context(|| format!("Could not parse span: \"{}\"", input))?;
    let days = (span.as_secs() / 86_400) as i64;
    if days < 1 {
        anyhow::bail!("Span \"{}\" is shorter than a day", input);
    }
    Ok(days)
}
