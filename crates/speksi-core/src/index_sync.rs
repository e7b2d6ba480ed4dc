//! Keeps the `(<done>/<total> tasks complete)` annotations in a spec's
//! `index.md` in line with the checkboxes in each story's `tasks.md`.

use crate::error::Result;
use crate::io;
use crate::paths;
use crate::story::list_stories;
use crate::types::DocKind;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A story whose index annotation was rewritten.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountUpdate {
    pub story: String,
    pub total: u32,
    pub done: u32,
}

/// Matches the tasks link of one story and the count annotation after it on
/// the same line.
fn count_line_re(folder: &str) -> Result<Regex> {
    let link = regex::escape(&format!("({}/{folder}/tasks.md)", paths::STORIES_DIR));
    let pattern = format!(r"({link}[^\n]*?)\((\d+)/(\d+) tasks complete\)");
    Regex::new(&pattern).map_err(|e| std::io::Error::other(e.to_string()).into())
}

/// Rewrite the annotation of each `(folder, total, done)` in `content`.
/// Returns the new text and the stories whose recorded counts differed.
fn rewrite_counts(
    content: &str,
    stories: &[(String, u32, u32)],
) -> Result<(String, Vec<CountUpdate>)> {
    let mut text = content.to_string();
    let mut changed = Vec::new();

    for (folder, total, done) in stories {
        let re = count_line_re(folder)?;
        let mut differs = false;
        let actual = format!("{done}/{total}");
        let next = re.replace_all(&text, |caps: &Captures| {
            if format!("{}/{}", &caps[2], &caps[3]) != actual {
                differs = true;
            }
            format!("{}({actual} tasks complete)", &caps[1])
        });
        if differs {
            text = next.into_owned();
            changed.push(CountUpdate {
                story: folder.clone(),
                total: *total,
                done: *done,
            });
        }
    }
    Ok((text, changed))
}

/// Recount every story's tasks and patch `index.md`.
///
/// The index is written at most once, and only when some count differs.
/// A missing index yields an empty list.
pub fn sync_task_counts(spec_dir: &Path) -> Result<Vec<CountUpdate>> {
    let index = paths::spec_doc(spec_dir, DocKind::Index);
    if !index.exists() {
        return Ok(Vec::new());
    }

    let stories: Vec<(String, u32, u32)> = list_stories(spec_dir)
        .into_iter()
        .filter(|s| s.has_tasks)
        .map(|s| (s.folder, s.tasks_total, s.tasks_done))
        .collect();

    let mut changed = Vec::new();
    let mut failure = None;
    io::rewrite_if_changed(&index, |content| match rewrite_counts(content, &stories) {
        Ok((text, updates)) => {
            changed = updates;
            Some(text)
        }
        Err(e) => {
            failure = Some(e);
            None
        }
    })?;
    if let Some(e) = failure {
        return Err(e);
    }

    for u in &changed {
        tracing::debug!(story = %u.story, done = u.done, total = u.total, "synced task count");
    }
    Ok(changed)
}
