//! Entity recognition over raw text.
//!
//! Patterns run against the original text so reported spans line up with
//! what the caller sees. Confidence starts at a base value and grows for
//! each context word found near the match, then overlapping candidates
//! are resolved in favor of earlier and longer spans.

use std::cmp::Reverse;

use gleanrs_core::{CharMap, Entity};
use gleanrs_rules::DomainRules;
use tracing::debug;

use crate::normalize::Lexicon;

const BASE_CONFIDENCE: f64 = 0.6;
const CONTEXT_BOOST: f64 = 0.1;
const CONTEXT_WINDOW: usize = 50;

/// Runs every pattern of the selected entity types, appends dosage spans
/// from the domain lexicon, and resolves overlaps. Passing `None` selects
/// all types the domain defines; unknown names are skipped.
#[must_use]
pub fn extract(
    text: &str,
    rules: &DomainRules,
    lexicon: &Lexicon,
    selected_types: Option<&[String]>,
) -> Vec<Entity> {
    let map = CharMap::new(text);
    let selected: Vec<&str> = selected_types.map_or_else(
        || rules.entity_type_names(),
        |names| names.iter().map(String::as_str).collect(),
    );

    let mut candidates = Vec::new();
    for type_name in selected {
        let Some(rule) = rules.entity_type(type_name) else {
            debug!("skipping unknown entity type {type_name}");
            continue;
        };
        for pattern in rule.patterns() {
            for found in pattern.regex().find_iter(text) {
                let start = map.char_of(found.start());
                let end = map.char_of(found.end());
                candidates.push(Entity {
                    text: found.as_str().to_string(),
                    start,
                    end,
                    entity_type: rule.name().to_string(),
                    confidence: score(text, &map, start, end, rule.context_words()),
                    pattern_matched: pattern.raw().to_string(),
                });
            }
        }
    }
    candidates.extend(lexicon.extract_dosages(text));

    let entities = resolve_overlaps(candidates);
    debug!(
        "extracted {} entities from {} chars",
        entities.len(),
        map.char_len()
    );
    entities
}

/// Drops every entity below the confidence floor. Order is preserved, so
/// filtering an already filtered list is a no-op.
#[must_use]
pub fn filter_by_confidence(entities: &[Entity], min_confidence: f64) -> Vec<Entity> {
    entities
        .iter()
        .filter(|entity| entity.confidence >= min_confidence)
        .cloned()
        .collect()
}

/// Base confidence plus one boost per context word present in the
/// surrounding window, capped at 1.0 and rounded to two decimals.
fn score(
    text: &str,
    map: &CharMap,
    start: usize,
    end: usize,
    context_words: &[String],
) -> f64 {
    let (window_start, window_end) = map.window(start, end, CONTEXT_WINDOW);
    let window = text[map.byte_of(window_start)..map.byte_of(window_end)].to_lowercase();
    let mut confidence = BASE_CONFIDENCE;
    for word in context_words {
        if window.contains(word.as_str()) {
            confidence += CONTEXT_BOOST;
        }
    }
    round2(confidence.min(1.0))
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Greedy overlap resolution: candidates are considered earliest first,
/// longest first on ties, and a candidate is kept only when it overlaps
/// nothing already kept. The survivors come back sorted by start.
fn resolve_overlaps(mut candidates: Vec<Entity>) -> Vec<Entity> {
    candidates.sort_by_key(|entity| (entity.start, Reverse(entity.span_len())));
    let mut kept: Vec<Entity> = Vec::new();
    for candidate in candidates {
        if kept.iter().all(|existing| !existing.overlaps(&candidate)) {
            kept.push(candidate);
        }
    }
    kept.sort_by_key(|entity| entity.start);
    kept
}
