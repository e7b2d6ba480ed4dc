use crate::output::{print_json, rel};
use anyhow::Context;
use speksi_core::{lifecycle, paths};
use std::path::Path;

pub fn run(root: &Path, json: bool) -> anyhow::Result<()> {
    let report = lifecycle::init(root)
        .with_context(|| format!("failed to initialize {}", root.display()))?;

    if json {
        return print_json(&report);
    }

    println!("Initializing ana-speksi in: {}", root.display());
    for dir in &report.dirs {
        println!("  dir:     {}/", rel(dir, root));
    }
    if report.config_created {
        println!("  created: {}", paths::CONFIG_FILE);
    } else {
        println!("  exists:  {}", paths::CONFIG_FILE);
    }
    println!("\nNext: ana-speksi new <ticket> <description>");
    Ok(())
}
