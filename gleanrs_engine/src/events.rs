//! Event recognition: trigger scanning and attribute binding.
//!
//! Triggers are literal phrases from the rule catalog. Around each hit
//! the recognizer binds attributes: date, time and location values come
//! from fixed sub-extraction patterns applied to a window of text, while
//! entity references collect already extracted entities within a
//! character proximity limit of the trigger span.

use std::collections::BTreeMap;

use gleanrs_core::{CharMap, Entity, Event};
use gleanrs_rules::{AttributeKind, DomainRules, EventTypeRule};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::annotator::EngineConfig;

const MONTHS: &str = "january|february|march|april|may|june|july|august|september|october|november|december";

static DATE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile_fixed(&[
        r"\d{1,2}[/-]\d{1,2}[/-]\d{2,4}".to_string(),
        format!(r"(?i)\d{{1,2}}\s+(?:{MONTHS})\s+\d{{2,4}}"),
        format!(r"(?i)(?:{MONTHS})\s+\d{{1,2}},?\s+\d{{2,4}}"),
        r"(?i)\b(?:yesterday|today|tomorrow)\b".to_string(),
        r"(?i)\blast\s+(?:week|month|year)\b".to_string(),
        r"(?i)\bnext\s+(?:week|month|year)\b".to_string(),
    ])
});

static TIME_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile_fixed(&[
        r"(?i)\d{1,2}:\d{2}(?:\s*(?:am|pm))?".to_string(),
        r"(?i)\b(?:morning|afternoon|evening|night)\b".to_string(),
    ])
});

static LOCATION_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile_fixed(&[
        r"(?i)\b\w+\s+hospital\b".to_string(),
        r"(?i)\b\w+\s+medical\s+center\b".to_string(),
        r"(?i)\b\w+\s+clinic\b".to_string(),
        r"(?i)\bemergency\s+room\b".to_string(),
        r"(?i)\bintensive\s+care\s+unit\b".to_string(),
        r"(?i)\bicu\b".to_string(),
        r"(?i)\ber\b".to_string(),
    ])
});

#[expect(clippy::expect_used, reason = "fixed pattern tables are validated by tests")]
fn compile_fixed(patterns: &[String]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|pattern| Regex::new(pattern).expect("fixed pattern must compile"))
        .collect()
}

/// Scans for every trigger of every event type and binds attributes to
/// each hit. Events come back sorted by start position; ties keep
/// catalog order.
#[must_use]
pub fn extract(
    text: &str,
    entities: &[Entity],
    rules: &DomainRules,
    config: &EngineConfig,
) -> Vec<Event> {
    let map = CharMap::new(text);
    let mut events = Vec::new();
    for event_type in rules.event_types() {
        for trigger in event_type.triggers() {
            for found in trigger.regex().find_iter(text) {
                let start = map.char_of(found.start());
                let end = map.char_of(found.end());
                events.push(Event {
                    event_type: event_type.name().to_string(),
                    trigger: found.as_str().to_string(),
                    start,
                    end,
                    confidence: config.event_confidence,
                    attributes: bind_attributes(
                        text, &map, start, end, event_type, entities, config,
                    ),
                    context: context_snippet(text, &map, start, end, config.context_window),
                });
            }
        }
    }
    events.sort_by_key(|event| event.start);
    debug!("extracted {} events from {} chars", events.len(), map.char_len());
    events
}

/// Surrounding text, trimmed, for display next to the event.
fn context_snippet(text: &str, map: &CharMap, start: usize, end: usize, window: usize) -> String {
    let (window_start, window_end) = map.window(start, end, window);
    text[map.byte_of(window_start)..map.byte_of(window_end)]
        .trim()
        .to_string()
}

fn bind_attributes(
    text: &str,
    map: &CharMap,
    start: usize,
    end: usize,
    event_type: &EventTypeRule,
    entities: &[Entity],
    config: &EngineConfig,
) -> BTreeMap<String, Vec<String>> {
    let (window_start, window_end) = map.window(start, end, config.attribute_window);
    let window = &text[map.byte_of(window_start)..map.byte_of(window_end)];

    let mut attributes = BTreeMap::new();
    for attribute in event_type.attributes() {
        let values = match attribute.kind() {
            AttributeKind::Date => collect_matches(&DATE_PATTERNS, window),
            AttributeKind::Time => collect_matches(&TIME_PATTERNS, window),
            AttributeKind::Location => collect_matches(&LOCATION_PATTERNS, window),
            AttributeKind::EntityRef(type_name) => {
                nearby_entity_texts(entities, type_name, start, end, config.proximity_threshold)
            }
        };
        if !values.is_empty() {
            attributes.insert(attribute.name().to_string(), values);
        }
    }
    attributes
}

fn collect_matches(patterns: &[Regex], window: &str) -> Vec<String> {
    patterns
        .iter()
        .flat_map(|pattern| pattern.find_iter(window).map(|m| m.as_str().to_string()))
        .collect()
}

/// Texts of entities of the given type whose span lies within the
/// proximity limit of the trigger span.
fn nearby_entity_texts(
    entities: &[Entity],
    type_name: &str,
    start: usize,
    end: usize,
    proximity: usize,
) -> Vec<String> {
    entities
        .iter()
        .filter(|entity| entity.entity_type.eq_ignore_ascii_case(type_name))
        .filter(|entity| span_distance(entity.start, entity.end, start, end) <= proximity)
        .map(|entity| entity.text.clone())
        .collect()
}

/// Character gap between two half-open spans; zero when they touch or
/// overlap.
const fn span_distance(a_start: usize, a_end: usize, b_start: usize, b_end: usize) -> usize {
    if a_end <= b_start {
        b_start - a_end
    } else if b_end <= a_start {
        a_start - b_end
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use gleanrs_rules::RuleCatalog;

    use super::*;

    const TEST_RULES: &str = r#"{
        "clinical_entities": {
            "MEDICATION": {
                "patterns": ["aspirin", "metformin"],
                "context_words": []
            }
        },
        "clinical_events": {
            "prescription": {
                "triggers": ["prescribed", "started on"],
                "attributes": ["medication", "date", "location"]
            },
            "admission": {
                "triggers": ["admitted"],
                "attributes": ["date", "time"]
            }
        }
    }"#;

    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn catalog() -> RuleCatalog {
        RuleCatalog::from_json(TEST_RULES).expect("test rules should parse")
    }

    fn medication(text: &str, start: usize, end: usize) -> Entity {
        Entity {
            text: text.to_string(),
            start,
            end,
            entity_type: "MEDICATION".to_string(),
            confidence: 0.6,
            pattern_matched: text.to_lowercase(),
        }
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn binds_entity_and_date_attributes() {
        let catalog = catalog();
        let rules = catalog.resolve("clinical");
        let text = "He was prescribed aspirin on January 5, 2024 at City Hospital.";
        let entities = vec![medication("aspirin", 18, 25)];
        let events = extract(text, &entities, rules, &EngineConfig::default());

        assert_eq!(events.len(), 1);
        let event = &events[0];
        assert_eq!(event.event_type, "prescription");
        assert_eq!(event.trigger, "prescribed");
        assert_eq!(
            event.attributes.get("medication"),
            Some(&vec!["aspirin".to_string()])
        );
        assert_eq!(
            event.attributes.get("date"),
            Some(&vec!["January 5, 2024".to_string()])
        );
        let locations = event
            .attributes
            .get("location")
            .expect("location should bind");
        assert_eq!(locations, &vec!["City Hospital".to_string()]);
    }

    #[test]
    fn distant_entities_are_not_bound() {
        let catalog = catalog();
        let rules = catalog.resolve("clinical");
        let padding = "x".repeat(300);
        let text = format!("prescribed today. {padding} aspirin");
        let aspirin_start = text.chars().count() - 7;
        let entities = vec![medication("aspirin", aspirin_start, aspirin_start + 7)];
        let events = extract(&text, &entities, rules, &EngineConfig::default());

        assert_eq!(events.len(), 1);
        assert!(events[0].attributes.get("medication").is_none());
    }

    #[test]
    fn entities_inside_proximity_limit_are_bound() {
        let catalog = catalog();
        let rules = catalog.resolve("clinical");
        let padding = "x".repeat(150);
        let text = format!("prescribed today. {padding} aspirin");
        let aspirin_start = text.chars().count() - 7;
        let entities = vec![medication("aspirin", aspirin_start, aspirin_start + 7)];
        let events = extract(&text, &entities, rules, &EngineConfig::default());

        assert_eq!(
            events[0].attributes.get("medication"),
            Some(&vec!["aspirin".to_string()])
        );
    }

    #[test]
    fn events_are_sorted_by_start() {
        let catalog = catalog();
        let rules = catalog.resolve("clinical");
        let text = "admitted yesterday, then prescribed aspirin, later started on metformin";
        let events = extract(text, &[], rules, &EngineConfig::default());

        assert_eq!(events.len(), 3);
        for pair in events.windows(2) {
            assert!(pair[0].start <= pair[1].start);
        }
        assert_eq!(events[0].event_type, "admission");
    }

    #[test]
    fn empty_attribute_groups_are_omitted() {
        let catalog = catalog();
        let rules = catalog.resolve("clinical");
        let events = extract("admitted for observation", &[], rules, &EngineConfig::default());

        assert_eq!(events.len(), 1);
        assert!(events[0].attributes.is_empty());
    }

    #[test]
    fn context_is_trimmed_window_text() {
        let catalog = catalog();
        let rules = catalog.resolve("clinical");
        let events = extract("  admitted overnight  ", &[], rules, &EngineConfig::default());

        assert_eq!(events[0].context, "admitted overnight");
    }

    #[test]
    fn time_attributes_come_from_fixed_patterns() {
        let catalog = catalog();
        let rules = catalog.resolve("clinical");
        let events = extract(
            "admitted at 3:30 pm on 12/05/2024",
            &[],
            rules,
            &EngineConfig::default(),
        );

        assert_eq!(
            events[0].attributes.get("time"),
            Some(&vec!["3:30 pm".to_string()])
        );
        assert_eq!(
            events[0].attributes.get("date"),
            Some(&vec!["12/05/2024".to_string()])
        );
    }

    #[test]
    fn span_distance_is_zero_for_overlap() {
        assert_eq!(span_distance(0, 5, 3, 8), 0);
        assert_eq!(span_distance(3, 8, 0, 5), 0);
        assert_eq!(span_distance(0, 5, 5, 8), 0);
        assert_eq!(span_distance(0, 5, 10, 12), 5);
        assert_eq!(span_distance(10, 12, 0, 5), 5);
    }
}
