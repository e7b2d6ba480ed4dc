use super::load_spec;
use crate::output::{print_json, rel};
use anyhow::Context;
use speksi_core::{
    acceptance::{accept_files, acceptance_status, AcceptanceStatus},
    config::Config,
    index_sync::sync_task_counts,
    spec::SpecStatus,
};
use std::path::Path;

pub fn run(root: &Path, name: Option<&str>, dry_run: bool, json: bool) -> anyhow::Result<()> {
    let spec = load_spec(root, name)?;
    let config = Config::load_or_default(root);
    let status = acceptance_status(&spec, &config);

    if dry_run {
        return report(&spec, &status, json);
    }

    if status.acceptance_target.is_none() {
        anyhow::bail!("no acceptance action available for phase: {}", spec.phase);
    }

    let outcomes = accept_files(&spec.path, &status.files_to_accept);
    let synced = if outcomes.is_empty() {
        Vec::new()
    } else {
        sync_task_counts(&spec.path)
            .with_context(|| format!("failed to sync task counts for {}", spec.name))?
    };

    if json {
        return print_json(&serde_json::json!({
            "acceptance": status,
            "accepted": outcomes,
            "synced": synced,
        }));
    }

    println!("Spec:   {}", spec.name);
    println!("Phase:  {}", spec.phase);
    println!("Action: {}", status.description);

    if !status.already_accepted.is_empty() {
        println!("\nAlready accepted ({}):", status.already_accepted.len());
        for f in &status.already_accepted {
            println!("  {}", rel(f, &spec.path));
        }
    }

    if outcomes.is_empty() {
        println!("\nAll relevant files are already accepted.");
        return Ok(());
    }

    println!("\nAccepting {} file(s):", outcomes.len());
    for o in &outcomes {
        let result = match (&o.error, o.accepted) {
            (Some(e), _) => format!("failed: {e}"),
            (None, true) => "done".to_string(),
            (None, false) => "no Draft status found".to_string(),
        };
        println!("  {} -- {result}", rel(&o.path, &spec.path));
    }
    if !synced.is_empty() {
        println!("\nSynced task counts:");
        for u in &synced {
            println!("  {}: {}/{}", u.story, u.done, u.total);
        }
    }
    println!("\nAcceptance complete.");
    Ok(())
}

/// Print what `accept` would do without touching any file.
fn report(spec: &SpecStatus, status: &AcceptanceStatus, json: bool) -> anyhow::Result<()> {
    if json {
        return print_json(&serde_json::json!({ "acceptance": status }));
    }

    println!("Spec:   {}", spec.name);
    println!("Phase:  {}", spec.phase);
    println!("Action: {}", status.description);
    if status.acceptance_target.is_none() {
        return Ok(());
    }

    if !status.already_accepted.is_empty() {
        println!("\nAlready accepted ({}):", status.already_accepted.len());
        for f in &status.already_accepted {
            println!("  {}", rel(f, &spec.path));
        }
    }
    if status.files_to_accept.is_empty() {
        println!("\nAll relevant files are already accepted.");
    } else {
        println!("\nWould accept {} file(s):", status.files_to_accept.len());
        for f in &status.files_to_accept {
            println!("  {}", rel(f, &spec.path));
        }
    }
    Ok(())
}
