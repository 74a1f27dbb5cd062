use std::time::Instant;

use chrono::{Duration, NaiveDate};
use tracing::{error, info};

use crate::diff::{diff, DiffResult};
use crate::error::RunError;
use crate::fetch::NameSource;
use crate::notify::{compose, Mailer};
use crate::snapshot::SnapshotStore;

/// Outcome of a completed run, for the binary's final log line.
#[derive(Debug)]
pub struct RunReport {
    pub total: usize,
    pub diff: DiffResult,
}

/// One comparison cycle: fetch today's names, load yesterday's snapshot,
/// diff, persist today's snapshot, notify.
///
/// A fetch failure aborts before anything is written or sent, so a stale
/// baseline is never overwritten with absent data. A persist failure does
/// not stop notification (the diff was computed from a successful fetch);
/// the email gains a stale-baseline warning and the run still fails with
/// the persist error after the mail goes out.
pub fn run(
    today: NaiveDate,
    source: &mut dyn NameSource,
    store: &SnapshotStore,
    mailer: &dyn Mailer,
) -> Result<RunReport, RunError> {
    let start = Instant::now();
    info!(
        action = "start",
        component = "run",
        date = %today,
        "Starting daily project name comparison"
    );

    let today_names = source.fetch_names()?;

    let yesterday = today - Duration::days(1);
    let yesterday_names = store.load(yesterday)?;

    let result = diff(&today_names, &yesterday_names);
    info!(
        action = "diff",
        component = "run",
        total = today_names.len(),
        added = result.added.len(),
        removed = result.removed.len(),
        "Comparison computed"
    );

    let persisted = store.save(today, &today_names);
    if let Err(e) = &persisted {
        error!(
            action = "error",
            component = "run",
            error = %e,
            "Snapshot write failed, notifying with stale-baseline warning"
        );
    }

    let email = compose(today, today_names.len(), &result, persisted.is_err());
    mailer.send(&email)?;

    persisted?;

    info!(
        action = "complete",
        component = "run",
        duration_ms = start.elapsed().as_millis(),
        "Daily comparison completed"
    );
    Ok(RunReport {
        total: today_names.len(),
        diff: result,
    })
}
