#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

//! Domain rule catalog for the extraction pipeline.
//!
//! Rules are plain data: each domain contributes a set of entity types
//! (regex-fragment patterns plus context keywords) and event types
//! (trigger phrases plus attribute names). The catalog is loaded once,
//! compiled eagerly, and read concurrently by any number of extraction
//! calls.

pub mod builtin;
pub mod catalog;
pub mod schema;

pub use builtin::DEFAULT_RULES_JSON;
pub use catalog::{
    Attribute, AttributeKind, CatalogError, CompiledPattern, DomainRules, EntityTypeRule,
    EventTypeRule, RuleCatalog,
};
pub use schema::{EntityTypeDef, EventTypeDef};
