use anyhow::{Context, Result};
use jamaah_core::jamaah::Jamaah;
use jamaah_core::notification::{load_sent_keys, plan_notifications, record_sent_keys};
use jamaah_core::schedule::Evaluator;
use tracing::info;

use super::{load_schedules, resolve_day};

/// Print notification documents as JSON on stdout, for the document-store writer to consume.
pub fn run(jamaah: &Jamaah, date: Option<&str>, mark_sent: bool) -> Result<()> {
    let day = resolve_day(jamaah, date)?;
    let records = load_schedules(jamaah)?;
    let sent_path = jamaah.sent_path();
    let sent = load_sent_keys(&sent_path)?;

    let report = Evaluator::new(day, jamaah.timezone()?).evaluate(&records);
    let notifications = plan_notifications(&report, &records, &sent);

    println!("{}", serde_json::to_string_pretty(&notifications)?);

    if mark_sent && !notifications.is_empty() {
        record_sent_keys(&sent_path, notifications.iter().map(|n| n.key.as_str()))
            .with_context(|| format!("Could not update {}", sent_path.display()))?;
        info!(count = notifications.len(), path = %sent_path.display(), "marked notifications as sent");
    }

    Ok(())
}
