use super::load_spec;
use crate::output::print_json;
use anyhow::Context;
use speksi_core::{
    ledger::next_task,
    paths,
    spec::resolve_story,
    story::list_story_files,
    types::DocKind,
};
use std::path::Path;

pub fn run(
    root: &Path,
    name: Option<&str>,
    story: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let spec = load_spec(root, name)?;
    let Some(story) = resolve_story(&spec, story)? else {
        if json {
            return print_json(&serde_json::json!({
                "spec_name": spec.name,
                "next_task": null,
            }));
        }
        println!("No pending tasks found in {}. All tasks are completed.", spec.name);
        return Ok(());
    };

    let tasks_path = spec.story_doc_path(story, DocKind::Tasks);
    if !tasks_path.exists() {
        anyhow::bail!("tasks.md not found for story {}", story.folder);
    }
    let content = std::fs::read_to_string(&tasks_path)
        .with_context(|| format!("failed to read {}", tasks_path.display()))?;
    let task = next_task(&content);
    let story_dir = paths::story_dir(&spec.path, &story.folder);
    let files = list_story_files(&story_dir)
        .with_context(|| format!("failed to list {}", story_dir.display()))?;

    if json {
        return print_json(&serde_json::json!({
            "spec_name": spec.name,
            "story_folder": story.folder,
            "story_name": story.name,
            "current_progress": format!("{}/{}", story.tasks_done, story.tasks_total),
            "next_task": task,
            "story_files": files,
        }));
    }

    println!("Spec:     {}", spec.name);
    println!("Story:    {}", story.folder);
    println!(
        "Progress: {}/{} tasks complete",
        story.tasks_done, story.tasks_total
    );

    if !files.is_empty() {
        println!("\nStory files:");
        for f in &files {
            println!("  - {}: {}", f.name, f.description);
        }
    }

    match task {
        Some(task) => {
            println!("\nNext task:");
            println!("{}", task.task_text);
            if let Some(details) = &task.description {
                println!("\nDetails:");
                println!("{details}");
            }
            if let Some(context) = &task.context {
                println!("\nContext:");
                println!("{context}");
            }
        }
        None => println!("\nNo incomplete tasks found."),
    }
    println!("\nAfter implementing this task, mark it done in tasks.md.");
    Ok(())
}
