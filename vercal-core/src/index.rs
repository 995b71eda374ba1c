//! Grouping of expanded occurrences into a per-date event index.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::date::ClockTime;
use crate::expand::Occurrence;

/// One event as consumed by the renderer. An absent end time is omitted from
/// serialized output entirely, never emitted as null.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventEntry {
    pub event_start: ClockTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_end: Option<ClockTime>,
    pub event: String,
}

/// Mapping from date to the events on that date. Within a date, events keep
/// the order in which expansion produced them.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct DateEventIndex {
    entries: BTreeMap<NaiveDate, Vec<EventEntry>>,
}

impl DateEventIndex {
    /// An index with no events. Every generation run constructs its own.
    pub fn new() -> Self {
        Self::default()
    }

    /// Group occurrences by date, preserving production order per date.
    pub fn from_occurrences(occurrences: &[Occurrence]) -> Self {
        let mut index = Self::new();
        for occ in occurrences {
            index.entries.entry(occ.date).or_default().push(EventEntry {
                event_start: occ.event_start,
                event_end: occ.event_end,
                event: occ.label.clone(),
            });
        }
        index
    }

    /// Events on `date`, in production order. Empty for dates with none.
    pub fn events_on(&self, date: NaiveDate) -> &[EventEntry] {
        self.entries.get(&date).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of distinct dates carrying at least one event.
    pub fn date_count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate dates in chronological order.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, &[EventEntry])> {
        self.entries.iter().map(|(date, events)| (*date, events.as_slice()))
    }
}
