use crate::doc_status::read_doc_status;
use crate::error::Result;
use crate::ledger::{count_tasks_in, TaskCounts};
use crate::paths;
use crate::types::{DocKind, DocStatus};
use serde::{Deserialize, Serialize};
use std::path::Path;

// ---------------------------------------------------------------------------
// StoryStatus
// ---------------------------------------------------------------------------

/// Snapshot of one `specs/<folder>/` directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryStatus {
    pub folder: String,
    pub name: String,
    pub has_functional_spec: bool,
    pub has_technical_spec: bool,
    pub has_data_model: bool,
    pub has_api_contract: bool,
    pub has_test_plan: bool,
    pub has_manual_test_plan: bool,
    pub has_tasks: bool,
    pub tasks_total: u32,
    pub tasks_done: u32,
    pub functional_spec_status: DocStatus,
    pub technical_spec_status: DocStatus,
    pub tasks_status: DocStatus,
}

impl StoryStatus {
    /// Build the record for the story directory at `dir`.
    pub fn read(dir: &Path) -> Self {
        let folder = dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let doc = |kind: DocKind| dir.join(kind.filename());

        let has_tasks = doc(DocKind::Tasks).exists();
        let counts = if has_tasks {
            count_tasks_in(&doc(DocKind::Tasks))
        } else {
            TaskCounts::default()
        };

        Self {
            name: folder.clone(),
            folder,
            has_functional_spec: doc(DocKind::FunctionalSpec).exists(),
            has_technical_spec: doc(DocKind::TechnicalSpec).exists(),
            has_data_model: doc(DocKind::DataModel).exists(),
            has_api_contract: doc(DocKind::ApiContract).exists(),
            has_test_plan: doc(DocKind::TestAutomationPlan).exists(),
            has_manual_test_plan: doc(DocKind::ManualTestingPlan).exists(),
            has_tasks,
            tasks_total: counts.total,
            tasks_done: counts.done,
            functional_spec_status: read_doc_status(&doc(DocKind::FunctionalSpec)),
            technical_spec_status: read_doc_status(&doc(DocKind::TechnicalSpec)),
            tasks_status: read_doc_status(&doc(DocKind::Tasks)),
        }
    }

    pub fn counts(&self) -> TaskCounts {
        TaskCounts {
            total: self.tasks_total,
            done: self.tasks_done,
        }
    }

    pub fn has_pending_tasks(&self) -> bool {
        self.has_tasks && self.tasks_done < self.tasks_total
    }

    /// Status of one of the three status-bearing story documents.
    /// Other kinds have no status and report `Empty`.
    pub fn doc_status(&self, kind: DocKind) -> DocStatus {
        match kind {
            DocKind::FunctionalSpec => self.functional_spec_status,
            DocKind::TechnicalSpec => self.technical_spec_status,
            DocKind::Tasks => self.tasks_status,
            _ => DocStatus::Empty,
        }
    }
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

/// One record per immediate sub-directory of `<spec>/specs/`, sorted by name.
///
/// A spec without a story container has no stories yet; that is not an error.
pub fn list_stories(spec_dir: &Path) -> Vec<StoryStatus> {
    let container = paths::stories_dir(spec_dir);
    let entries = match std::fs::read_dir(&container) {
        Ok(entries) => entries,
        Err(e) => {
            if container.exists() {
                tracing::warn!(path = %container.display(), error = %e, "cannot list stories");
            }
            return Vec::new();
        }
    };

    let mut dirs: Vec<_> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|p| p.is_dir())
        .collect();
    dirs.sort();
    dirs.iter().map(|d| StoryStatus::read(d)).collect()
}

/// A markdown file in a story folder with a short description of its role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryFile {
    pub name: String,
    pub description: String,
}

pub fn list_story_files(story_dir: &Path) -> Result<Vec<StoryFile>> {
    if !story_dir.is_dir() {
        return Ok(Vec::new());
    }
    let mut names = Vec::new();
    for entry in std::fs::read_dir(story_dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "md") {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    names.sort();
    Ok(names
        .into_iter()
        .map(|name| {
            let description = DocKind::from_filename(&name)
                .filter(|k| DocKind::story_docs().contains(k))
                .map_or("Story resource file", DocKind::description)
                .to_string();
            StoryFile { name, description }
        })
        .collect())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
