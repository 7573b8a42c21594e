//! Write the embedded rule catalog to disk for customization.

use std::fs;
use std::path::Path;

use anyhow::{Context, bail};
use gleanrs_rules::DEFAULT_RULES_JSON;

pub fn run(path: &Path) -> anyhow::Result<()> {
    if path.exists() {
        bail!(
            "{} already exists. Edit it directly or choose another path.",
            path.display()
        );
    }
    fs::write(path, DEFAULT_RULES_JSON)
        .with_context(|| format!("cannot write {}", path.display()))?;
    println!("Wrote default rule catalog to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn refuses_to_overwrite() {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        let path = dir.path().join("rules.json");

        run(&path).expect("first write should succeed");
        let written = fs::read_to_string(&path).expect("catalog file should exist");
        assert!(written.contains("healthcare_entities"));

        let error = run(&path).expect_err("second write should be refused");
        assert!(error.to_string().contains("already exists"));
    }
}
