//! Checkbox task ledger parsing for `tasks.md`.
//!
//! Task lines look like `- [ ] text` (open) or `- [x] text` (done). An open
//! task may be followed by `### Details` and `### Context` (or
//! `### Implementation Context`) sub-sections; their body lines belong to the
//! task until the next checkbox line or end of file.

use serde::{Deserialize, Serialize};
use std::path::Path;

const OPEN_BOX: &str = "- [ ]";
const DONE_BOX: &str = "- [x]";
const SUBHEADING: &str = "### ";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskCounts {
    pub total: u32,
    pub done: u32,
}

impl TaskCounts {
    /// At least one task exists and every task is checked.
    pub fn is_complete(self) -> bool {
        self.total > 0 && self.done >= self.total
    }

    pub fn remaining(self) -> u32 {
        self.total.saturating_sub(self.done)
    }
}

/// First unfinished task of a ledger with its attached sections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextTask {
    pub task_text: String,
    pub description: Option<String>,
    pub context: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Checkbox {
    Open,
    Done,
}

/// Classify a line as a checkbox task line. Leading indentation is allowed
/// so nested sub-tasks count too.
fn checkbox(line: &str) -> Option<(Checkbox, &str)> {
    let trimmed = line.trim_start();
    if let Some(rest) = trimmed.strip_prefix(OPEN_BOX) {
        Some((Checkbox::Open, rest))
    } else {
        trimmed
            .strip_prefix(DONE_BOX)
            .map(|rest| (Checkbox::Done, rest))
    }
}

pub fn count_tasks(content: &str) -> TaskCounts {
    content
        .lines()
        .filter_map(checkbox)
        .fold(TaskCounts::default(), |mut acc, (state, _)| {
            acc.total += 1;
            if state == Checkbox::Done {
                acc.done += 1;
            }
            acc
        })
}

/// Counts for the ledger at `path`; a missing or unreadable file counts as empty.
pub fn count_tasks_in(path: &Path) -> TaskCounts {
    match std::fs::read_to_string(path) {
        Ok(content) => count_tasks(&content),
        Err(e) => {
            if path.exists() {
                tracing::warn!(path = %path.display(), error = %e, "unreadable task ledger");
            }
            TaskCounts::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Details,
    Context,
    Ignored,
}

impl Section {
    fn from_heading(name: &str) -> Self {
        match name {
            "Details" => Section::Details,
            "Context" | "Implementation Context" => Section::Context,
            _ => Section::Ignored,
        }
    }
}

#[derive(Clone, Copy)]
enum ScanState {
    Seeking,
    InTask { section: Option<Section> },
}

struct TaskBuilder {
    task: NextTask,
    buffer: Vec<String>,
}

impl TaskBuilder {
    fn new(text: &str) -> Self {
        Self {
            task: NextTask {
                task_text: text.trim().to_string(),
                description: None,
                context: None,
            },
            buffer: Vec::new(),
        }
    }

    /// Move buffered body lines into the field for `section`.
    fn flush(&mut self, section: Option<Section>) {
        let lines = std::mem::take(&mut self.buffer);
        if lines.is_empty() {
            return;
        }
        let body = lines.join("\n").trim().to_string();
        match section {
            Some(Section::Details) => self.task.description = Some(body),
            Some(Section::Context) => self.task.context = Some(body),
            Some(Section::Ignored) | None => {}
        }
    }

    fn finish(mut self, section: Option<Section>) -> NextTask {
        self.flush(section);
        self.task
    }
}

/// Extract the first unchecked task. Single forward pass, no backtracking.
pub fn next_task(content: &str) -> Option<NextTask> {
    let mut state = ScanState::Seeking;
    let mut builder: Option<TaskBuilder> = None;

    for line in content.lines() {
        match state {
            ScanState::Seeking => {
                if let Some((Checkbox::Open, rest)) = checkbox(line) {
                    builder = Some(TaskBuilder::new(rest));
                    state = ScanState::InTask { section: None };
                }
            }
            ScanState::InTask { section } => {
                let Some(b) = builder.as_mut() else {
                    break;
                };
                if checkbox(line).is_some() {
                    return builder.map(|b| b.finish(section));
                }
                if let Some(heading) = line.strip_prefix(SUBHEADING) {
                    b.flush(section);
                    state = ScanState::InTask {
                        section: Some(Section::from_heading(heading.trim())),
                    };
                } else if section.is_some() && !line.trim().is_empty() {
                    b.buffer.push(line.to_string());
                }
            }
        }
    }

    match state {
        ScanState::InTask { section } => builder.map(|b| b.finish(section)),
        ScanState::Seeking => None,
    }
}
