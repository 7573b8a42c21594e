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

//! Shared data model for the extraction pipeline.
//!
//! Entities and events are plain records created per extraction call.
//! They carry half-open character spans into the source text and have no
//! identity beyond the call that produced them.

pub mod record;
pub mod span;

pub use record::{Analysis, Entity, Event, Statistics, TimelineEntry, TypeSummary};
pub use span::CharMap;
