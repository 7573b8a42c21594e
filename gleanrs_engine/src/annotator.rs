//! Pipeline facade tying rules, recognizers and aggregation together.

use gleanrs_core::{Analysis, Entity, Event};
use gleanrs_rules::{CatalogError, RuleCatalog};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::normalize::Lexicon;
use crate::{entities, events, stats};

pub type Result<T> = std::result::Result<T, ExtractError>;

#[derive(Debug, Error)]
pub enum ExtractError {
    /// Input was empty or whitespace only.
    #[error("no text provided")]
    InvalidInput,

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Tunable extraction thresholds. All distances are measured in
/// characters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Entities scoring below this are dropped by [`Annotator::analyze`].
    #[serde(default = "default_min_confidence")]
    pub min_confidence: f64,
    /// Confidence assigned to every trigger hit.
    #[serde(default = "default_event_confidence")]
    pub event_confidence: f64,
    /// Maximum gap between an entity and a trigger for attribute binding.
    #[serde(default = "default_proximity_threshold")]
    pub proximity_threshold: usize,
    /// Half-width of the window searched for date, time and location
    /// attribute values.
    #[serde(default = "default_attribute_window")]
    pub attribute_window: usize,
    /// Half-width of the context snippet stored on each event.
    #[serde(default = "default_context_window")]
    pub context_window: usize,
}

const fn default_min_confidence() -> f64 {
    0.5
}

const fn default_event_confidence() -> f64 {
    0.7
}

const fn default_proximity_threshold() -> usize {
    200
}

const fn default_attribute_window() -> usize {
    150
}

const fn default_context_window() -> usize {
    100
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_confidence: default_min_confidence(),
            event_confidence: default_event_confidence(),
            proximity_threshold: default_proximity_threshold(),
            attribute_window: default_attribute_window(),
            context_window: default_context_window(),
        }
    }
}

/// Extraction pipeline over a rule catalog.
///
/// The annotator is immutable after construction and safe to share
/// across threads.
#[derive(Debug)]
pub struct Annotator {
    catalog: RuleCatalog,
    config: EngineConfig,
}

impl Annotator {
    #[must_use]
    pub const fn new(catalog: RuleCatalog, config: EngineConfig) -> Self {
        Self { catalog, config }
    }

    /// Builds an annotator over the built-in rule catalog with default
    /// thresholds.
    pub fn with_defaults() -> Result<Self> {
        Ok(Self::new(RuleCatalog::builtin()?, EngineConfig::default()))
    }

    #[must_use]
    pub const fn catalog(&self) -> &RuleCatalog {
        &self.catalog
    }

    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Extracts entities without confidence filtering. Unknown domains
    /// fall back to the catalog default.
    pub fn extract_entities(
        &self,
        text: &str,
        domain: &str,
        selected_types: Option<&[String]>,
    ) -> Result<Vec<Entity>> {
        ensure_text(text)?;
        let rules = self.catalog.resolve(domain);
        let lexicon = Lexicon::for_domain(rules.name());
        Ok(entities::extract(text, rules, lexicon, selected_types))
    }

    /// Extracts events, binding attributes against the supplied entity
    /// list.
    pub fn extract_events(
        &self,
        text: &str,
        entity_list: &[Entity],
        domain: &str,
    ) -> Result<Vec<Event>> {
        ensure_text(text)?;
        let rules = self.catalog.resolve(domain);
        Ok(events::extract(text, entity_list, rules, &self.config))
    }

    /// Full pipeline: entity extraction, confidence filtering, event
    /// extraction against the filtered entities, then aggregation.
    pub fn analyze(
        &self,
        text: &str,
        domain: &str,
        selected_types: Option<&[String]>,
    ) -> Result<Analysis> {
        ensure_text(text)?;
        let rules = self.catalog.resolve(domain);
        let lexicon = Lexicon::for_domain(rules.name());

        let candidates = entities::extract(text, rules, lexicon, selected_types);
        let entities = entities::filter_by_confidence(&candidates, self.config.min_confidence);
        let events = events::extract(text, &entities, rules, &self.config);
        let statistics = stats::aggregate(&entities, &events);
        debug!(
            "analysis complete for domain {}: {} entities, {} events",
            rules.name(),
            entities.len(),
            events.len()
        );

        Ok(Analysis {
            domain: rules.name().to_string(),
            entities,
            events,
            statistics,
        })
    }
}

fn ensure_text(text: &str) -> Result<()> {
    if text.trim().is_empty() {
        return Err(ExtractError::InvalidInput);
    }
    Ok(())
}
