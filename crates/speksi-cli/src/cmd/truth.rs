use crate::output::print_json;
use anyhow::Context;
use clap::Subcommand;
use speksi_core::paths::{self, TruthEntry};
use std::path::Path;

#[derive(Subcommand)]
pub enum TruthSubcommand {
    /// Print the ground-truth tree
    Show,
}

pub fn run(root: &Path, subcmd: TruthSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        TruthSubcommand::Show => show(root, json),
    }
}

fn show(root: &Path, json: bool) -> anyhow::Result<()> {
    let entries = paths::truth_tree(root).context("failed to read ground truth")?;

    if json {
        return print_json(&serde_json::json!({ "truth": entries }));
    }

    if entries.is_empty() {
        println!("Ground truth is empty. Run as-docufy or as-from-changes to populate it.");
        return Ok(());
    }

    println!("{}/{}/", paths::ROOT_DIR, paths::TRUTH_DIR);
    for entry in &entries {
        println!("{}", tree_line(entry));
    }
    Ok(())
}

fn tree_line(entry: &TruthEntry) -> String {
    let indent = "  ".repeat(entry.depth + 1);
    let suffix = if entry.is_dir { "/" } else { "" };
    format!("{indent}{}{suffix}", entry.name)
}
