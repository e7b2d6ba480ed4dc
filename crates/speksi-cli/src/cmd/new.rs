use crate::output::print_json;
use anyhow::Context;
use speksi_core::{lifecycle, spec::spec_status};
use std::path::Path;

pub fn run(
    root: &Path,
    ticket: &str,
    description: &str,
    short_name: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let dir = lifecycle::create_spec(root, ticket, description, short_name)
        .context("failed to create spec")?;
    let spec = spec_status(&dir);

    if json {
        return print_json(&serde_json::json!({
            "name": spec.name,
            "path": spec.path,
            "phase": spec.phase,
        }));
    }

    println!("Created new spec: {}", spec.name);
    println!("  Location: {}", spec.path.display());
    println!("  Phase:    {}", spec.phase);
    println!("\nNext: fill in proposal.md, then run:");
    println!("  ana-speksi continue {}", spec.name);
    Ok(())
}
