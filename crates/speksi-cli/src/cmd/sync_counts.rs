use crate::output::print_json;
use anyhow::Context;
use speksi_core::{
    index_sync::{sync_task_counts, CountUpdate},
    spec::{list_ongoing, resolve_spec},
    SpeksiError,
};
use std::path::Path;

#[derive(serde::Serialize)]
struct Synced {
    spec: String,
    updated: Vec<CountUpdate>,
}

pub fn run(root: &Path, name: Option<&str>, json: bool) -> anyhow::Result<()> {
    let specs = list_ongoing(root).context("failed to list ongoing specs")?;
    if specs.is_empty() {
        return Err(SpeksiError::NoOngoingSpecs.into());
    }
    let targets = match name {
        Some(_) => vec![resolve_spec(specs, name)?],
        None => specs,
    };

    let mut results = Vec::with_capacity(targets.len());
    for spec in targets {
        let updated = sync_task_counts(&spec.path)
            .with_context(|| format!("failed to sync task counts for {}", spec.name))?;
        results.push(Synced {
            spec: spec.name,
            updated,
        });
    }

    if json {
        return print_json(&serde_json::json!({ "synced": results }));
    }

    for r in &results {
        println!("{}", r.spec);
        if r.updated.is_empty() {
            println!("  No changes needed.");
        }
        for u in &r.updated {
            println!("  {}: {}/{} tasks complete", u.story, u.done, u.total);
        }
    }
    Ok(())
}
