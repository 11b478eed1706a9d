//! Action-log replay for the normalized entity cache.
//!
//! An action log is newline-delimited JSON, one action per line. Blank
//! lines and lines starting with `#` are skipped.

use std::io::BufRead;

use anyhow::{Context, Result};
use clap::ValueEnum;
use entcache_store::Store;
use tracing::{debug, warn};

/// What to do when an action is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ErrorPolicy {
    /// Stop at the first rejected action.
    #[default]
    Halt,
    /// Log the rejected action and continue with the next line.
    Skip,
}

/// Counters for one replay run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplayReport {
    /// Actions decoded and applied, including no-ops.
    pub dispatched: usize,
    /// Actions that produced a new snapshot.
    pub changed: usize,
    /// Actions rejected under `ErrorPolicy::Skip`.
    pub skipped: usize,
}

/// Dispatches every action in `input` to `store`.
pub fn replay<R: BufRead>(store: &mut Store, input: R, policy: ErrorPolicy) -> Result<ReplayReport> {
    let mut report = ReplayReport::default();

    for (idx, line) in input.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.with_context(|| format!("failed to read line {line_no}"))?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let before = store.snapshot().revision();
        match store.dispatch_json(line) {
            Ok(snapshot) => {
                report.dispatched += 1;
                if snapshot.revision() != before {
                    report.changed += 1;
                }
                debug!(line = line_no, revision = snapshot.revision(), "dispatched");
            }
            Err(e) => match policy {
                ErrorPolicy::Halt => {
                    return Err(e).with_context(|| format!("action on line {line_no} rejected"));
                }
                ErrorPolicy::Skip => {
                    warn!(line = line_no, error = %e, "skipping rejected action");
                    report.skipped += 1;
                }
            },
        }
    }

    Ok(report)
}
