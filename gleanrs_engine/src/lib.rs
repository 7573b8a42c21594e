#![warn(
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

//! Pattern-driven extraction pipeline.
//!
//! [`Annotator`] runs the full flow over a rule catalog: entity
//! recognition with confidence scoring, overlap resolution, event
//! trigger scanning with attribute binding, and statistics aggregation.
//! The recognizers are also usable on their own through the [`entities`]
//! and [`events`] modules.

mod annotator;
pub mod entities;
pub mod events;
pub mod normalize;
pub mod stats;

pub use annotator::{Annotator, EngineConfig, ExtractError, Result};
pub use entities::filter_by_confidence;
pub use normalize::Lexicon;
