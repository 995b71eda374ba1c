//! Reading the tabular schedule source.
//!
//! One CSV row per recurrence rule. Rows are validated eagerly, before any
//! rendering starts: the first bad row aborts the run with an error naming
//! the row and field.

use std::path::Path;

use anyhow::{bail, Context, Result};
use vercal_core::{RecurrenceRule, ScheduleRow};

/// Columns every schedule file must carry. `event_end` and `except` are
/// optional.
const REQUIRED_COLUMNS: [&str; 5] = [
    "period_start",
    "period_end",
    "week_of_day",
    "event_start",
    "event",
];

/// Read and validate every rule row from `path`.
pub fn read_rules(path: &Path) -> Result<Vec<RecurrenceRule>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open schedule file {}", path.display()))?;

    let headers = reader
        .headers()
        .with_context(|| format!("Failed to read header row of {}", path.display()))?
        .clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|header| header.trim() == column) {
            bail!(
                "Schedule file {} is missing required column '{}'",
                path.display(),
                column
            );
        }
    }

    let mut rules = Vec::new();
    for (i, row) in reader.deserialize::<ScheduleRow>().enumerate() {
        // 1-based data rows; the header is row 1 of the file.
        let row_number = i + 2;
        let row = row.with_context(|| {
            format!("Failed to parse row {} of {}", row_number, path.display())
        })?;
        rules.push(RecurrenceRule::from_row(&row, row_number)?);
    }
    Ok(rules)
}
