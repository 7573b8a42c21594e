//! List the entity types a domain defines.
//!
//! Unlike extraction, this command looks the domain up strictly: asking
//! for an unconfigured domain is an error rather than a fallback.

use std::path::Path;

pub fn run(domain: &str, rules: Option<&Path>) -> anyhow::Result<()> {
    let catalog = super::load_catalog(rules)?;
    let domain_rules = catalog.load(domain)?;
    for name in domain_rules.entity_type_names() {
        println!("{name}");
    }
    Ok(())
}
