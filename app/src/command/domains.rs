//! List the domains configured in the active rule catalog.

use std::path::Path;

pub fn run(rules: Option<&Path>) -> anyhow::Result<()> {
    let catalog = super::load_catalog(rules)?;
    for domain in catalog.domains() {
        if domain == catalog.default_domain() {
            println!("{domain} (default)");
        } else {
            println!("{domain}");
        }
    }
    Ok(())
}
