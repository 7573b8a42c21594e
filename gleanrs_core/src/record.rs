//! Entity, event and summary records.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A typed span of source text recognized by the entity recognizer.
///
/// `start`/`end` are half-open character offsets into the source text,
/// with `end > start`. `text` is the matched slice of the original
/// (case-preserved) input.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Entity {
    pub text: String,
    pub start: usize,
    pub end: usize,
    #[serde(rename = "type")]
    pub entity_type: String,
    /// Always in `[0, 1]`, rounded to two decimal places.
    pub confidence: f64,
    /// The raw pattern string that produced this match.
    pub pattern_matched: String,
}

impl Entity {
    /// Span length in characters.
    #[must_use]
    pub const fn span_len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Half-open interval overlap test against another entity's span.
    #[must_use]
    pub const fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && self.end > other.start
    }
}

/// A trigger occurrence with its bound attributes.
///
/// Events are a separate layer from entities: they are never
/// overlap-resolved, and may overlap both entities and each other.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Event {
    #[serde(rename = "type")]
    pub event_type: String,
    /// The trigger phrase as it appears in the source text.
    pub trigger: String,
    pub start: usize,
    pub end: usize,
    pub confidence: f64,
    /// Attribute name to resolved values. Attributes that resolved to
    /// nothing are absent, never present with an empty list.
    #[serde(default)]
    pub attributes: BTreeMap<String, Vec<String>>,
    /// Source text surrounding the trigger occurrence.
    pub context: String,
}

/// Per-type occurrence summary.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TypeSummary {
    pub count: usize,
    /// Matched/triggering texts in first-seen order, repeats included.
    pub samples: Vec<String>,
}

/// Aggregated per-type summaries for one extraction call.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Statistics {
    pub entities: BTreeMap<String, TypeSummary>,
    pub events: BTreeMap<String, TypeSummary>,
    pub total_entities: usize,
    pub total_events: usize,
}

/// An event's chronological view: emitted only for events that carry a
/// `date` attribute.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimelineEntry {
    #[serde(rename = "type")]
    pub event_type: String,
    pub trigger: String,
    pub start: usize,
    pub dates: Vec<String>,
}

/// Complete output of one pipeline run.
///
/// `domain` is the domain whose rules were actually applied, so callers
/// can detect that an unknown requested domain fell back to the default.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Analysis {
    pub domain: String,
    pub entities: Vec<Entity>,
    pub events: Vec<Event>,
    pub statistics: Statistics,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(start: usize, end: usize) -> Entity {
        Entity {
            text: String::new(),
            start,
            end,
            entity_type: "TEST".to_string(),
            confidence: 0.6,
            pattern_matched: String::new(),
        }
    }

    #[test]
    fn test_overlap_is_half_open() {
        let a = entity(0, 5);
        let b = entity(5, 10);
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn test_overlap_detects_containment() {
        let outer = entity(0, 14);
        let inner = entity(3, 8);
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    #[test]
    fn test_overlap_detects_partial() {
        let a = entity(0, 6);
        let b = entity(4, 9);
        assert!(a.overlaps(&b));
    }

    #[test]
    fn test_span_len() {
        assert_eq!(entity(3, 8).span_len(), 5);
    }
}
