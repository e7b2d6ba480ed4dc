use super::load_spec;
use crate::output::print_json;
use anyhow::Context;
use speksi_core::{lifecycle, types::Phase};
use std::path::Path;

pub fn run(root: &Path, name: Option<&str>, force: bool, json: bool) -> anyhow::Result<()> {
    let spec = load_spec(root, name)?;
    if spec.phase != Phase::Docufy && !force {
        anyhow::bail!(
            "spec '{}' is in phase {}, not docufy (pass --force to archive anyway)",
            spec.name,
            spec.phase
        );
    }

    let dest = lifecycle::archive_spec(root, &spec)
        .with_context(|| format!("failed to archive {}", spec.name))?;

    if json {
        return print_json(&serde_json::json!({
            "spec": spec.name,
            "archived_to": dest,
        }));
    }
    println!("Archived {} -> {}", spec.name, dest.display());
    Ok(())
}
