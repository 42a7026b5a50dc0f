//! Schedule records and the single place they are evaluated.
//!
//! Records arrive in the shape the document store exports them. They are turned
//! into [`RecurrencePolicy`] values here, and every consumer (dashboard, backfill
//! scan, notification planning) goes through one [`Evaluator`] carrying an
//! explicit `today` and time zone.

use std::collections::HashSet;
use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::date_range::DateRange;
use crate::error::{CoreError, CoreResult};
use crate::recurrence::{Frequency, RecurrencePolicy, parse_weekday};

/// A schedule document as stored remotely.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRecord {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<String>,
    #[serde(default)]
    pub days: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<RecordTimestamp>,
}

/// Creation timestamp as found in exports: RFC 3339 text or a
/// `{seconds, nanoseconds}` object. Anything else is kept so the record can be
/// reported instead of dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordTimestamp {
    Rfc3339(DateTime<Utc>),
    Seconds {
        #[serde(alias = "_seconds")]
        seconds: i64,
        #[serde(default, alias = "_nanoseconds")]
        nanoseconds: u32,
    },
    Unparsed(serde_json::Value),
}

impl RecordTimestamp {
    pub fn to_utc(&self) -> Option<DateTime<Utc>> {
        match self {
            RecordTimestamp::Rfc3339(dt) => Some(*dt),
            RecordTimestamp::Seconds {
                seconds,
                nanoseconds,
            } => DateTime::from_timestamp(*seconds, *nanoseconds),
            RecordTimestamp::Unparsed(_) => None,
        }
    }
}

impl RecurrencePolicy {
    /// Build a policy from a stored record.
    ///
    /// The anchor is the creation timestamp projected onto a calendar day in `tz`.
    /// A missing or unreadable timestamp is an error; the current time is never
    /// used as an anchor.
    pub fn from_record(record: &ScheduleRecord, tz: Tz) -> CoreResult<Self> {
        let created_at = match &record.created_at {
            None => return Err(CoreError::invalid_policy(&record.id, "createdAt is missing")),
            Some(ts) => ts.to_utc().ok_or_else(|| {
                CoreError::invalid_policy(&record.id, format!("createdAt is unreadable: {ts:?}"))
            })?,
        };

        let days = record
            .days
            .iter()
            .map(|name| {
                parse_weekday(name).ok_or_else(|| {
                    CoreError::invalid_policy(&record.id, format!("unknown weekday '{name}'"))
                })
            })
            .collect::<CoreResult<Vec<_>>>()?;

        let frequency = record.frequency.as_deref().and_then(Frequency::parse);
        if let Some(Frequency::Other(name)) = &frequency {
            debug!(id = %record.id, frequency = %name, "unrecognised frequency, using weekday filter");
        }

        Ok(RecurrencePolicy::new(
            frequency,
            days,
            created_at.with_timezone(&tz).date_naive(),
        ))
    }
}

/// Read an exported schedule collection (a JSON array of records).
pub fn load_records(path: &Path) -> CoreResult<Vec<ScheduleRecord>> {
    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| {
        CoreError::Serialization(format!("Could not parse {}: {e}", path.display()))
    })
}

/// A record that could not be turned into a policy.
#[derive(Debug, Clone, Serialize)]
pub struct InvalidSchedule {
    pub id: String,
    pub reason: String,
}

/// Which schedules are due on one day.
#[derive(Debug, Clone, Serialize)]
pub struct DueReport {
    pub date: NaiveDate,
    pub due: Vec<String>,
    pub not_due: Vec<String>,
    pub invalid: Vec<InvalidSchedule>,
}

impl DueReport {
    pub fn is_due(&self, id: &str) -> bool {
        self.due.iter().any(|d| d == id)
    }
}

/// One day a schedule falls on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Occurrence {
    pub schedule_id: String,
    pub date: NaiveDate,
}

impl Occurrence {
    /// Dedup key shared with notification documents.
    pub fn key(&self) -> String {
        format!("{}:{}", self.schedule_id, self.date.format("%Y-%m-%d"))
    }
}

/// Evaluates schedules against an explicit day and time zone.
#[derive(Debug, Clone, Copy)]
pub struct Evaluator {
    today: NaiveDate,
    tz: Tz,
}

impl Evaluator {
    pub fn new(today: NaiveDate, tz: Tz) -> Self {
        Evaluator { today, tz }
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn tz(&self) -> Tz {
        self.tz
    }

    /// Same evaluator pointed at another day.
    pub fn for_day(&self, day: NaiveDate) -> Self {
        Evaluator { today: day, ..*self }
    }

    /// Dashboard view: split records into due, not due and invalid.
    pub fn evaluate(&self, records: &[ScheduleRecord]) -> DueReport {
        let mut report = DueReport {
            date: self.today,
            due: Vec::new(),
            not_due: Vec::new(),
            invalid: Vec::new(),
        };

        for (record, policy) in self.policies(records, &mut report.invalid) {
            if policy.is_due(self.today) {
                report.due.push(record.id.clone());
            } else {
                report.not_due.push(record.id.clone());
            }
        }

        report
    }

    /// Walk every day in `range` and list occurrences whose key is not in `already`.
    ///
    /// Invalid records are logged and skipped.
    pub fn backfill(
        &self,
        records: &[ScheduleRecord],
        range: &DateRange,
        already: &HashSet<String>,
    ) -> Vec<Occurrence> {
        let mut invalid = Vec::new();
        let policies = self.policies(records, &mut invalid);

        let mut occurrences = Vec::new();
        for day in range.days() {
            for (record, policy) in &policies {
                if !policy.is_due(day) {
                    continue;
                }
                let occurrence = Occurrence {
                    schedule_id: record.id.clone(),
                    date: day,
                };
                if !already.contains(&occurrence.key()) {
                    occurrences.push(occurrence);
                }
            }
        }

        debug!(
            from = %range.from,
            to = %range.to,
            found = occurrences.len(),
            skipped = invalid.len(),
            "backfill scan finished"
        );
        occurrences
    }

    fn policies<'a>(
        &self,
        records: &'a [ScheduleRecord],
        invalid: &mut Vec<InvalidSchedule>,
    ) -> Vec<(&'a ScheduleRecord, RecurrencePolicy)> {
        records
            .iter()
            .filter_map(|record| match RecurrencePolicy::from_record(record, self.tz) {
                Ok(policy) => Some((record, policy)),
                Err(e) => {
                    warn!(id = %record.id, error = %e, "skipping schedule");
                    invalid.push(InvalidSchedule {
                        id: record.id.clone(),
                        reason: match e {
                            CoreError::InvalidPolicy { reason, .. } => reason,
                            other => other.to_string(),
                        },
                    });
                    None
                }
            })
            .collect()
    }
}
