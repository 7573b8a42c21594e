//! On-disk rule definition format.
//!
//! A rule file is a single JSON object whose keys pair up per domain:
//! `<domain>_entities` maps entity-type names to [`EntityTypeDef`] and
//! `<domain>_events` maps event-type names to [`EventTypeDef`]. Key order
//! in the file becomes catalog iteration order.

use serde::{Deserialize, Serialize};

/// Entity-type definition as written in a rule file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityTypeDef {
    /// Case-insensitive regex fragments, compiled word-bounded.
    pub patterns: Vec<String>,

    /// Keywords that raise match confidence when found near a match.
    #[serde(default)]
    pub context_words: Vec<String>,
}

/// Event-type definition as written in a rule file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventTypeDef {
    /// Literal phrases whose occurrence signals the event. Unlike entity
    /// patterns these are NOT regex fragments; the catalog escapes them.
    pub triggers: Vec<String>,

    /// Attribute names, each naming a sub-extractor (`date`, `time`,
    /// `location`/`hospital`) or an entity type to bind by proximity.
    #[serde(default)]
    pub attributes: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn test_entity_def_context_words_default_empty() {
        let def: EntityTypeDef =
            serde_json::from_str(r#"{"patterns": ["aspirin"]}"#).expect("minimal def parses");
        assert_eq!(def.patterns, vec!["aspirin"]);
        assert!(def.context_words.is_empty());
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn test_event_def_attributes_default_empty() {
        let def: EventTypeDef =
            serde_json::from_str(r#"{"triggers": ["admitted"]}"#).expect("minimal def parses");
        assert_eq!(def.triggers, vec!["admitted"]);
        assert!(def.attributes.is_empty());
    }

    #[test]
    fn test_entity_def_requires_patterns() {
        let parsed = serde_json::from_str::<EntityTypeDef>(r#"{"context_words": ["x"]}"#);
        assert!(parsed.is_err());
    }
}
