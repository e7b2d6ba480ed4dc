use crate::output::{check_mark, print_json, print_table, status_cell};
use anyhow::Context;
use speksi_core::{
    phase::blocking_check,
    spec::{list_ongoing, resolve_spec, SpecStatus},
};
use std::path::Path;

pub fn run(root: &Path, name: Option<&str>, json: bool) -> anyhow::Result<()> {
    let specs = list_ongoing(root).context("failed to list ongoing specs")?;
    let specs = match name {
        Some(_) => vec![resolve_spec(specs, name)?],
        None => specs,
    };

    if json {
        return print_json(&serde_json::json!({
            "root": root,
            "ongoing": specs,
        }));
    }

    if specs.is_empty() {
        println!("No ongoing specs. Run: ana-speksi new <ticket> <description>");
        return Ok(());
    }

    for (i, spec) in specs.iter().enumerate() {
        if i > 0 {
            println!();
        }
        print_spec(spec);
    }
    Ok(())
}

fn print_spec(spec: &SpecStatus) {
    println!("{}", spec.name);
    println!("  Phase:    {} ({})", spec.phase, spec.phase.description());
    if let Some(check) = blocking_check(&spec.facts()) {
        println!("  Blocked:  {}", check.message);
    }
    println!("  Proposal: {}", status_cell(spec.proposal_status));
    println!("  Index:    {}", check_mark(spec.has_index));
    println!("  Research: {}", check_mark(spec.has_research));

    if spec.stories.is_empty() {
        println!("  Stories:  none");
        return;
    }
    println!();
    let rows: Vec<Vec<String>> = spec
        .stories
        .iter()
        .map(|s| {
            vec![
                s.folder.clone(),
                status_cell(s.functional_spec_status),
                status_cell(s.technical_spec_status),
                status_cell(s.tasks_status),
                if s.has_tasks {
                    format!("{}/{}", s.tasks_done, s.tasks_total)
                } else {
                    "-".to_string()
                },
            ]
        })
        .collect();
    print_table(&["STORY", "FUNCTIONAL", "TECHNICAL", "TASKS", "DONE"], &rows);
}
