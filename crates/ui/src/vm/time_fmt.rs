use chrono::{DateTime, Utc};

/// Elapsed time between two instants as `m:ss`; negative spans read as zero.
#[must_use]
pub fn format_elapsed(started_at: DateTime<Utc>, completed_at: DateTime<Utc>) -> String {
    let seconds = (completed_at - started_at).num_seconds().max(0);
    let minutes = seconds / 60;
    let remainder = seconds % 60;
    format!("{minutes}:{remainder:02}")
}
