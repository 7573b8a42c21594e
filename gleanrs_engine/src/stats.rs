//! Aggregation of extraction output into per-type summaries.

use std::collections::BTreeMap;

use gleanrs_core::{Entity, Event, Statistics, TimelineEntry, TypeSummary};

/// Entity counts and sample texts, grouped by entity type.
#[must_use]
pub fn entity_statistics(entities: &[Entity]) -> BTreeMap<String, TypeSummary> {
    let mut summaries: BTreeMap<String, TypeSummary> = BTreeMap::new();
    for entity in entities {
        let summary = summaries.entry(entity.entity_type.clone()).or_default();
        summary.count += 1;
        summary.samples.push(entity.text.clone());
    }
    summaries
}

/// Event counts and trigger texts, grouped by event type.
#[must_use]
pub fn event_statistics(events: &[Event]) -> BTreeMap<String, TypeSummary> {
    let mut summaries: BTreeMap<String, TypeSummary> = BTreeMap::new();
    for event in events {
        let summary = summaries.entry(event.event_type.clone()).or_default();
        summary.count += 1;
        summary.samples.push(event.trigger.clone());
    }
    summaries
}

/// Combined statistics for one analysis run.
#[must_use]
pub fn aggregate(entities: &[Entity], events: &[Event]) -> Statistics {
    Statistics {
        entities: entity_statistics(entities),
        events: event_statistics(events),
        total_entities: entities.len(),
        total_events: events.len(),
    }
}

/// Events that carry a `date` attribute, ordered by their first date
/// value and then by position in the text.
#[must_use]
pub fn timeline(events: &[Event]) -> Vec<TimelineEntry> {
    let mut entries: Vec<TimelineEntry> = events
        .iter()
        .filter_map(|event| {
            event.attributes.get("date").map(|dates| TimelineEntry {
                event_type: event.event_type.clone(),
                trigger: event.trigger.clone(),
                start: event.start,
                dates: dates.clone(),
            })
        })
        .collect();
    entries.sort_by(|a, b| {
        let a_key = a.dates.first().map_or("", String::as_str);
        let b_key = b.dates.first().map_or("", String::as_str);
        a_key.cmp(b_key).then(a.start.cmp(&b.start))
    });
    entries
}
