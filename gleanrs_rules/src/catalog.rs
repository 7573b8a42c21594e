//! Rule catalog loading, validation and pattern compilation.

use crate::schema::{EntityTypeDef, EventTypeDef};
use regex::Regex;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info, warn};

const ENTITIES_SUFFIX: &str = "_entities";
const EVENTS_SUFFIX: &str = "_events";

/// Domain used when a caller asks for one the catalog does not define,
/// provided the catalog defines it itself.
pub const DEFAULT_DOMAIN: &str = "healthcare";

/// Error type for catalog loading.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read rule file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed rule file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("rule file defines no domains")]
    Empty,

    #[error("unknown domain: {0}")]
    UnknownDomain(String),

    #[error("domain {domain:?} is missing its {domain}{suffix} section")]
    MissingSection { domain: String, suffix: &'static str },

    #[error("invalid pattern {pattern:?} for {type_name}: {source}")]
    Pattern {
        type_name: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// A source pattern string paired with its compiled regex.
///
/// Compilation wraps the source in `(?i)\b...\b`, so every pattern
/// matches case-insensitively on whole words.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    raw: String,
    regex: Regex,
}

impl CompiledPattern {
    /// Compile a regex fragment (entity pattern).
    fn fragment(raw: &str, type_name: &str) -> Result<Self, CatalogError> {
        Self::compile(raw, raw, type_name)
    }

    /// Compile a literal phrase (event trigger). The phrase is escaped so
    /// punctuation is never read as regex metacharacters.
    fn literal(phrase: &str, type_name: &str) -> Result<Self, CatalogError> {
        Self::compile(phrase, &regex::escape(phrase), type_name)
    }

    fn compile(raw: &str, body: &str, type_name: &str) -> Result<Self, CatalogError> {
        let regex =
            Regex::new(&format!(r"(?i)\b{body}\b")).map_err(|source| CatalogError::Pattern {
                type_name: type_name.to_string(),
                pattern: raw.to_string(),
                source,
            })?;
        Ok(Self {
            raw: raw.to_string(),
            regex,
        })
    }

    /// The pattern string as written in the rule file.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The compiled word-bounded, case-insensitive regex.
    #[must_use]
    pub const fn regex(&self) -> &Regex {
        &self.regex
    }
}

/// How an event attribute is resolved at binding time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeKind {
    /// Date sub-extractor over the trigger window.
    Date,
    /// Time sub-extractor over the trigger window.
    Time,
    /// Location sub-extractor (attribute names `location` and `hospital`).
    Location,
    /// Bind entities of the named type near the trigger.
    EntityRef(String),
}

/// A configured event attribute with its load-time classification.
#[derive(Debug, Clone)]
pub struct Attribute {
    name: String,
    kind: AttributeKind,
}

impl Attribute {
    fn classify(name: &str) -> Self {
        let kind = match name.to_ascii_lowercase().as_str() {
            "date" => AttributeKind::Date,
            "time" => AttributeKind::Time,
            "location" | "hospital" => AttributeKind::Location,
            // both spellings reference the TREATMENT entity type
            "treatment" | "procedure" => AttributeKind::EntityRef("TREATMENT".to_string()),
            other => AttributeKind::EntityRef(other.to_uppercase()),
        };
        Self {
            name: name.to_string(),
            kind,
        }
    }

    /// The attribute name as configured (used as the output key).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn kind(&self) -> &AttributeKind {
        &self.kind
    }
}

/// A compiled entity type: named patterns plus confidence context words.
#[derive(Debug, Clone)]
pub struct EntityTypeRule {
    name: String,
    patterns: Vec<CompiledPattern>,
    context_words: Vec<String>,
}

impl EntityTypeRule {
    fn build(name: &str, def: &EntityTypeDef) -> Result<Self, CatalogError> {
        let patterns = def
            .patterns
            .iter()
            .map(|p| CompiledPattern::fragment(p, name))
            .collect::<Result<Vec<_>, _>>()?;
        // context windows are matched lowercased, so store words lowercased
        let context_words = def
            .context_words
            .iter()
            .map(|w| w.to_lowercase())
            .collect();
        Ok(Self {
            name: name.to_string(),
            patterns,
            context_words,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn patterns(&self) -> &[CompiledPattern] {
        &self.patterns
    }

    #[must_use]
    pub fn context_words(&self) -> &[String] {
        &self.context_words
    }
}

/// A compiled event type: escaped triggers plus classified attributes.
#[derive(Debug, Clone)]
pub struct EventTypeRule {
    name: String,
    triggers: Vec<CompiledPattern>,
    attributes: Vec<Attribute>,
}

impl EventTypeRule {
    fn build(name: &str, def: &EventTypeDef) -> Result<Self, CatalogError> {
        let triggers = def
            .triggers
            .iter()
            .map(|t| CompiledPattern::literal(t, name))
            .collect::<Result<Vec<_>, _>>()?;
        let attributes = def
            .attributes
            .iter()
            .map(|a| Attribute::classify(a))
            .collect();
        Ok(Self {
            name: name.to_string(),
            triggers,
            attributes,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn triggers(&self) -> &[CompiledPattern] {
        &self.triggers
    }

    #[must_use]
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }
}

/// One domain's compiled rule set, in rule-file order.
#[derive(Debug, Clone)]
pub struct DomainRules {
    name: String,
    entity_types: Vec<EntityTypeRule>,
    event_types: Vec<EventTypeRule>,
}

impl DomainRules {
    /// The domain this rule set belongs to. Callers that requested a
    /// different domain can compare against this to detect fallback.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn entity_types(&self) -> &[EntityTypeRule] {
        &self.entity_types
    }

    #[must_use]
    pub fn event_types(&self) -> &[EventTypeRule] {
        &self.event_types
    }

    /// Look up an entity type by name, case-insensitively.
    #[must_use]
    pub fn entity_type(&self, name: &str) -> Option<&EntityTypeRule> {
        self.entity_types
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(name))
    }

    #[must_use]
    pub fn entity_type_names(&self) -> Vec<&str> {
        self.entity_types.iter().map(|t| t.name.as_str()).collect()
    }
}

/// The full domain-keyed rule table, loaded once and read-only after.
#[derive(Debug, Clone)]
pub struct RuleCatalog {
    domains: Vec<DomainRules>,
    default_domain: String,
}

impl RuleCatalog {
    /// Parse and compile a catalog from rule-file JSON.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let root: Map<String, Value> = serde_json::from_str(json)?;

        let mut domains: Vec<DomainRules> = Vec::new();
        for (key, value) in &root {
            let Some(domain) = key.strip_suffix(ENTITIES_SUFFIX) else {
                continue;
            };
            let entity_types = parse_entity_section(value)?;
            let events_key = format!("{domain}{EVENTS_SUFFIX}");
            let events_value = root
                .get(&events_key)
                .ok_or_else(|| CatalogError::MissingSection {
                    domain: domain.to_string(),
                    suffix: EVENTS_SUFFIX,
                })?;
            let event_types = parse_event_section(events_value)?;
            domains.push(DomainRules {
                name: domain.to_string(),
                entity_types,
                event_types,
            });
        }

        // an orphan events section means its entities half is missing
        for key in root.keys() {
            if let Some(domain) = key.strip_suffix(EVENTS_SUFFIX) {
                if !root.contains_key(&format!("{domain}{ENTITIES_SUFFIX}")) {
                    return Err(CatalogError::MissingSection {
                        domain: domain.to_string(),
                        suffix: ENTITIES_SUFFIX,
                    });
                }
            } else if !key.ends_with(ENTITIES_SUFFIX) {
                debug!("ignoring unrecognized rule file key {key:?}");
            }
        }

        if domains.is_empty() {
            return Err(CatalogError::Empty);
        }

        let default_domain = if domains.iter().any(|d| d.name == DEFAULT_DOMAIN) {
            DEFAULT_DOMAIN.to_string()
        } else {
            domains[0].name.clone()
        };

        Ok(Self {
            domains,
            default_domain,
        })
    }

    /// Load and compile a catalog from a rule file on disk.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let catalog = Self::from_json(&json)?;
        info!(
            "loaded rule catalog from {} ({} domains)",
            path.display(),
            catalog.domains.len()
        );
        Ok(catalog)
    }

    /// Strict lookup: fails with `UnknownDomain` instead of falling back.
    pub fn load(&self, domain: &str) -> Result<&DomainRules, CatalogError> {
        self.find(domain)
            .ok_or_else(|| CatalogError::UnknownDomain(domain.to_string()))
    }

    /// Lookup with documented leniency: an unknown domain resolves to the
    /// default domain's rule set. The returned rules carry their own
    /// domain name, so the caller can see which set was applied.
    #[must_use]
    pub fn resolve(&self, domain: &str) -> &DomainRules {
        self.find(domain).unwrap_or_else(|| {
            warn!(
                "unknown domain {domain:?}, falling back to {:?}",
                self.default_domain
            );
            self.default_rules()
        })
    }

    /// The rule set the catalog falls back to for unknown domains.
    #[must_use]
    pub fn default_rules(&self) -> &DomainRules {
        // construction rejects empty rule files, so index 0 exists
        self.find(&self.default_domain)
            .unwrap_or_else(|| &self.domains[0])
    }

    /// Override the fallback domain. The name must exist in the catalog.
    pub fn with_default_domain(mut self, domain: &str) -> Result<Self, CatalogError> {
        if self.find(domain).is_none() {
            return Err(CatalogError::UnknownDomain(domain.to_string()));
        }
        self.default_domain = domain.to_string();
        Ok(self)
    }

    /// Configured domain names, in rule-file order.
    #[must_use]
    pub fn domains(&self) -> Vec<&str> {
        self.domains.iter().map(|d| d.name.as_str()).collect()
    }

    #[must_use]
    pub fn default_domain(&self) -> &str {
        &self.default_domain
    }

    fn find(&self, domain: &str) -> Option<&DomainRules> {
        self.domains.iter().find(|d| d.name == domain)
    }
}

fn parse_entity_section(value: &Value) -> Result<Vec<EntityTypeRule>, CatalogError> {
    let section: Map<String, Value> = serde_json::from_value(value.clone())?;
    section
        .iter()
        .map(|(name, def)| {
            let def: EntityTypeDef = serde_json::from_value(def.clone())?;
            EntityTypeRule::build(name, &def)
        })
        .collect()
}

fn parse_event_section(value: &Value) -> Result<Vec<EventTypeRule>, CatalogError> {
    let section: Map<String, Value> = serde_json::from_value(value.clone())?;
    section
        .iter()
        .map(|(name, def)| {
            let def: EventTypeDef = serde_json::from_value(def.clone())?;
            EventTypeRule::build(name, &def)
        })
        .collect()
}
