//! Expansion of weekly recurrence rules into dated occurrences.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

use crate::date::ClockTime;
use crate::rule::RecurrenceRule;

/// One concrete dated instance of a recurrence rule.
#[derive(Debug, Clone, PartialEq)]
pub struct Occurrence {
    pub date: NaiveDate,
    pub weekday: Weekday,
    pub event_start: ClockTime,
    pub event_end: Option<ClockTime>,
    pub label: String,
}

/// Expand one rule at 7-day strides, starting from the first on-or-after
/// occurrence of its weekday within the period. Dates listed in the rule's
/// exceptions are dropped; an exception matching no generated date is
/// silently tolerated.
pub fn expand(rule: &RecurrenceRule) -> Vec<Occurrence> {
    let offset = (i64::from(rule.weekday.num_days_from_monday())
        - i64::from(rule.period_start.weekday().num_days_from_monday()))
    .rem_euclid(7);

    let mut occurrences = Vec::new();
    let mut current = rule.period_start + Duration::days(offset);
    while current <= rule.period_end {
        if !rule.exceptions.contains(&current) {
            occurrences.push(Occurrence {
                date: current,
                weekday: rule.weekday,
                event_start: rule.event_start,
                event_end: rule.event_end,
                label: rule.label.clone(),
            });
        }
        current = current + Duration::days(7);
    }
    occurrences
}

/// Expand every rule, concatenating results in input order. There is no
/// cross-rule deduplication: two rules that independently generate the same
/// date both appear.
pub fn expand_all(rules: &[RecurrenceRule]) -> Vec<Occurrence> {
    rules.iter().flat_map(expand).collect()
}
