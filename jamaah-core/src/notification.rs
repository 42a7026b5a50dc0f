//! Notification documents for schedules that are due.
//!
//! The document store and push delivery live outside this crate. This module only
//! decides which documents to create, keyed so that the same schedule is never
//! announced twice for the same day.

use std::collections::HashSet;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CoreError, CoreResult};
use crate::schedule::{DueReport, Occurrence, ScheduleRecord};

/// A notification document ready to be written to the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub key: String,
    pub schedule_id: String,
    pub title: String,
    pub date: NaiveDate,
    pub body: String,
}

impl Notification {
    pub fn for_occurrence(occurrence: &Occurrence, record: Option<&ScheduleRecord>) -> Self {
        let title = record
            .map(|r| r.title.trim())
            .filter(|t| !t.is_empty())
            .unwrap_or(&occurrence.schedule_id)
            .to_string();
        let body = format!("{} is scheduled for {}", title, occurrence.date.format("%A, %-d %B %Y"));

        Notification {
            key: occurrence.key(),
            schedule_id: occurrence.schedule_id.clone(),
            title,
            date: occurrence.date,
            body,
        }
    }
}

/// Notifications to create for today's due schedules, skipping keys in `sent`.
pub fn plan_notifications(
    report: &DueReport,
    records: &[ScheduleRecord],
    sent: &HashSet<String>,
) -> Vec<Notification> {
    let occurrences: Vec<Occurrence> = report
        .due
        .iter()
        .map(|id| Occurrence {
            schedule_id: id.clone(),
            date: report.date,
        })
        .collect();
    notifications_for(&occurrences, records, sent)
}

/// Notifications for arbitrary occurrences (e.g. a backfill scan), skipping keys in `sent`.
pub fn notifications_for(
    occurrences: &[Occurrence],
    records: &[ScheduleRecord],
    sent: &HashSet<String>,
) -> Vec<Notification> {
    let planned: Vec<Notification> = occurrences
        .iter()
        .filter(|o| !sent.contains(&o.key()))
        .map(|o| {
            let record = records.iter().find(|r| r.id == o.schedule_id);
            Notification::for_occurrence(o, record)
        })
        .collect();

    debug!(
        candidates = occurrences.len(),
        planned = planned.len(),
        "planned notifications"
    );
    planned
}

/// Read keys of notifications already sent. A missing file means nothing was sent yet.
pub fn load_sent_keys(path: &Path) -> CoreResult<HashSet<String>> {
    if !path.exists() {
        return Ok(HashSet::new());
    }
    let content = std::fs::read_to_string(path)?;
    let keys: Vec<String> = serde_json::from_str(&content).map_err(|e| {
        CoreError::Serialization(format!("Could not parse {}: {e}", path.display()))
    })?;
    Ok(keys.into_iter().collect())
}

/// Add keys to the sent file, keeping it sorted.
pub fn record_sent_keys<'a>(
    path: &Path,
    keys: impl IntoIterator<Item = &'a str>,
) -> CoreResult<()> {
    let mut all = load_sent_keys(path)?;
    all.extend(keys.into_iter().map(String::from));

    let mut sorted: Vec<_> = all.into_iter().collect();
    sorted.sort();

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let content =
        serde_json::to_string_pretty(&sorted).map_err(|e| CoreError::Serialization(e.to_string()))?;
    std::fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::RecordTimestamp;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn records() -> Vec<ScheduleRecord> {
        vec![
            ScheduleRecord {
                id: "kas".into(),
                title: "Iuran kas".into(),
                frequency: Some("month_twice".into()),
                days: vec![],
                created_at: Some(RecordTimestamp::Rfc3339("2024-01-01T00:00:00Z".parse().unwrap())),
            },
            ScheduleRecord {
                id: "ronda".into(),
                title: "  ".into(),
                frequency: None,
                days: vec![],
                created_at: Some(RecordTimestamp::Rfc3339("2024-01-01T00:00:00Z".parse().unwrap())),
            },
        ]
    }

    fn report() -> DueReport {
        DueReport {
            date: date(2024, 1, 15),
            due: vec!["kas".into(), "ronda".into()],
            not_due: vec![],
            invalid: vec![],
        }
    }

    #[test]
    fn plans_one_notification_per_due_schedule() {
        let planned = plan_notifications(&report(), &records(), &HashSet::new());
        assert_eq!(planned.len(), 2);
        assert_eq!(planned[0].key, "kas:2024-01-15");
        assert_eq!(planned[0].title, "Iuran kas");
        assert_eq!(planned[0].body, "Iuran kas is scheduled for Monday, 15 January 2024");
    }

    #[test]
    fn blank_title_falls_back_to_id() {
        let planned = plan_notifications(&report(), &records(), &HashSet::new());
        assert_eq!(planned[1].title, "ronda");
    }

    #[test]
    fn already_sent_keys_are_skipped() {
        let sent: HashSet<String> = ["kas:2024-01-15".to_string()].into();
        let planned = plan_notifications(&report(), &records(), &sent);
        assert_eq!(planned.len(), 1);
        assert_eq!(planned[0].schedule_id, "ronda");
    }

    #[test]
    fn serializes_camel_case() {
        let planned = plan_notifications(&report(), &records(), &HashSet::new());
        let json = serde_json::to_value(&planned[0]).unwrap();
        assert_eq!(json["scheduleId"], "kas");
        assert_eq!(json["date"], "2024-01-15");
    }

    #[test]
    fn sent_keys_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state").join("notified.json");

        assert!(load_sent_keys(&path).unwrap().is_empty());

        record_sent_keys(&path, ["kas:2024-01-15", "ronda:2024-01-15"]).unwrap();
        record_sent_keys(&path, ["kas:2024-01-15", "kas:2024-01-29"]).unwrap();

        let keys = load_sent_keys(&path).unwrap();
        assert_eq!(keys.len(), 3);
        assert!(keys.contains("kas:2024-01-29"));
    }
}
