//! Recurrence rule rows and their validation.

use std::collections::BTreeSet;

use chrono::{NaiveDate, Weekday};
use serde::Deserialize;

use crate::date::{parse_date, parse_weekday, ClockTime};
use crate::error::{VercalError, VercalResult};

/// Delimiter between dates in the `except` column.
pub const EXCEPT_DELIMITER: char = ';';

/// One raw row from the schedule table, before validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScheduleRow {
    pub period_start: String,
    pub period_end: String,
    pub week_of_day: String,
    pub event_start: String,
    #[serde(default)]
    pub event_end: Option<String>,
    pub event: String,
    #[serde(default)]
    pub except: Option<String>,
}

/// A validated weekly recurrence rule.
#[derive(Debug, Clone)]
pub struct RecurrenceRule {
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub weekday: Weekday,
    pub event_start: ClockTime,
    pub event_end: Option<ClockTime>,
    pub label: String,
    pub exceptions: BTreeSet<NaiveDate>,
}

impl RecurrenceRule {
    /// Validate one schedule row. `row_number` is 1-based and only used to
    /// name the offending row in errors.
    pub fn from_row(row: &ScheduleRow, row_number: usize) -> VercalResult<Self> {
        let required = [
            ("period_start", &row.period_start),
            ("period_end", &row.period_end),
            ("week_of_day", &row.week_of_day),
            ("event_start", &row.event_start),
            ("event", &row.event),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(VercalError::MissingField {
                    row: row_number,
                    field: field.to_string(),
                });
            }
        }

        let invalid = |e: VercalError| VercalError::InvalidRule {
            row: row_number,
            reason: e.to_string(),
        };

        let period_start = parse_date(&row.period_start).map_err(invalid)?;
        let period_end = parse_date(&row.period_end).map_err(invalid)?;
        if period_start > period_end {
            return Err(VercalError::InvalidRule {
                row: row_number,
                reason: format!(
                    "period_start {} is after period_end {}",
                    period_start, period_end
                ),
            });
        }

        let weekday = parse_weekday(&row.week_of_day).map_err(invalid)?;
        let event_start: ClockTime = row.event_start.parse().map_err(invalid)?;
        // A blank end time means the event has no duration, not an error.
        let event_end = match row.event_end.as_deref() {
            Some(value) if !value.trim().is_empty() => Some(value.parse().map_err(invalid)?),
            _ => None,
        };

        // Exception dates are parsed independently of the recurrence; whether
        // they land on a generated date is checked during expansion.
        let mut exceptions = BTreeSet::new();
        if let Some(except) = row.except.as_deref() {
            for part in except.split(EXCEPT_DELIMITER) {
                let part = part.trim();
                if part.is_empty() {
                    continue;
                }
                exceptions.insert(parse_date(part).map_err(invalid)?);
            }
        }

        Ok(RecurrenceRule {
            period_start,
            period_end,
            weekday,
            event_start,
            event_end,
            label: row.event.clone(),
            exceptions,
        })
    }
}
