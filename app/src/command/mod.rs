//! CLI command implementations.
//!
//! Each subcommand lives in its own module with a plain `run` function;
//! `main` dispatches to them after argument parsing.

use std::path::Path;

use gleanrs_rules::RuleCatalog;

pub mod domains;
pub mod extract;
pub mod init;
pub mod sample;
pub mod types;

/// Load the catalog from a user-supplied file, or fall back to the
/// embedded default.
fn load_catalog(rules: Option<&Path>) -> anyhow::Result<RuleCatalog> {
    let catalog = match rules {
        Some(path) => RuleCatalog::from_path(path)?,
        None => RuleCatalog::builtin()?,
    };
    Ok(catalog)
}
