use super::load_spec;
use crate::output::{print_json, rel};
use speksi_core::{acceptance::acceptance_status, config::Config, phase::blocking_check};
use std::path::Path;

pub fn run(root: &Path, name: Option<&str>, json: bool) -> anyhow::Result<()> {
    let spec = load_spec(root, name)?;
    let config = Config::load_or_default(root);
    let gate = acceptance_status(&spec, &config);
    let needing_work: Vec<&str> = spec
        .stories_needing_work()
        .into_iter()
        .map(|s| s.folder.as_str())
        .collect();
    let rules = config.rules_for(spec.phase);

    if json {
        return print_json(&serde_json::json!({
            "spec": spec.name,
            "phase": spec.phase,
            "phase_description": spec.phase.description(),
            "next_skill": spec.phase.skill(),
            "blocked_by": blocking_check(&spec.facts()).map(|c| c.id),
            "total_story_count": spec.stories.len(),
            "stories_needing_work": needing_work,
            "rules": rules,
            "context": config.context(),
            "acceptance_gate": {
                "satisfied": gate.satisfied(),
                "auto_confirm": gate.auto_confirm,
                "files_to_accept": gate.files_to_accept,
                "already_accepted": gate.already_accepted,
            },
        }));
    }

    println!("Spec:          {}", spec.name);
    println!("Current phase: {}", spec.phase);

    if !gate.satisfied() {
        println!("\nAcceptance gate not satisfied. The following files need acceptance:");
        for f in &gate.files_to_accept {
            println!("  - {}", rel(f, &spec.path));
        }
        println!("\nRun: ana-speksi accept {}", spec.name);
        return Ok(());
    }

    println!("Description:   {}", spec.phase.description());
    if !needing_work.is_empty() {
        println!(
            "\nStories needing work: {} of {}",
            needing_work.len(),
            spec.stories.len()
        );
        for folder in &needing_work {
            println!("  - {folder}");
        }
    }
    if !rules.is_empty() {
        println!("\nRules for {}:", spec.phase);
        for rule in rules {
            println!("  - {rule}");
        }
    }
    println!("\nInvoke skill: {}", spec.phase.skill());
    Ok(())
}
