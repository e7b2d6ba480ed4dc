use crate::doc_status::read_doc_status;
use crate::error::{Result, SpeksiError};
use crate::paths;
use crate::phase::{self, SpecFacts};
use crate::story::{list_stories, StoryStatus};
use crate::types::{DocKind, DocStatus, Phase};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// SpecStatus
// ---------------------------------------------------------------------------

/// Snapshot of one ongoing spec. Valid only for the current invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecStatus {
    pub name: String,
    pub path: PathBuf,
    pub phase: Phase,
    pub has_proposal: bool,
    pub has_index: bool,
    pub has_research: bool,
    pub proposal_status: DocStatus,
    pub stories: Vec<StoryStatus>,
}

impl SpecStatus {
    /// Read the spec at `spec_dir`. Stories are listed once and shared with
    /// phase detection so both views agree.
    pub fn read(spec_dir: &Path) -> Self {
        let stories = list_stories(spec_dir);
        let proposal_status = read_doc_status(&paths::spec_doc(spec_dir, DocKind::Proposal));
        let has_index = paths::spec_doc(spec_dir, DocKind::Index).exists();
        let has_research = paths::spec_doc(spec_dir, DocKind::Research).exists();
        let phase = phase::classify(&SpecFacts {
            proposal: proposal_status,
            has_index,
            has_research,
            stories: &stories,
        });

        Self {
            name: spec_dir
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            path: spec_dir.to_path_buf(),
            phase,
            has_proposal: proposal_status != DocStatus::Empty,
            has_index,
            has_research,
            proposal_status,
            stories,
        }
    }

    pub fn facts(&self) -> SpecFacts<'_> {
        SpecFacts {
            proposal: self.proposal_status,
            has_index: self.has_index,
            has_research: self.has_research,
            stories: &self.stories,
        }
    }

    pub fn doc_path(&self, kind: DocKind) -> PathBuf {
        paths::spec_doc(&self.path, kind)
    }

    pub fn story_doc_path(&self, story: &StoryStatus, kind: DocKind) -> PathBuf {
        paths::story_doc(&self.path, &story.folder, kind)
    }

    /// Whether `query` names this spec: exact, or the `-<query>` suffix.
    pub fn matches(&self, query: &str) -> bool {
        self.name == query || self.name.ends_with(&format!("-{query}"))
    }

    /// Find a story by exact folder name, then by substring.
    pub fn find_story(&self, query: &str) -> Result<&StoryStatus> {
        self.stories
            .iter()
            .find(|s| s.folder == query)
            .or_else(|| self.stories.iter().find(|s| s.folder.contains(query)))
            .ok_or_else(|| SpeksiError::StoryNotFound {
                spec: self.name.clone(),
                story: query.to_string(),
            })
    }

    /// First story, in story order, that still has unchecked tasks.
    pub fn first_pending_story(&self) -> Option<&StoryStatus> {
        self.stories.iter().find(|s| s.has_pending_tasks())
    }

    /// Stories that still need work for the current phase.
    pub fn stories_needing_work(&self) -> Vec<&StoryStatus> {
        let needs: fn(&StoryStatus) -> bool = match self.phase {
            Phase::Proposal | Phase::Storify => return Vec::new(),
            Phase::Research | Phase::Techify => |s| !s.has_technical_spec,
            Phase::Taskify => |s| !s.has_tasks,
            Phase::Codify => |s| !s.counts().is_complete(),
            Phase::Docufy => |_| true,
        };
        self.stories.iter().filter(|s| needs(s)).collect()
    }
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

pub fn spec_status(spec_dir: &Path) -> SpecStatus {
    SpecStatus::read(spec_dir)
}

/// Snapshots of every spec directory under `<root>/ongoing`, sorted by name.
pub fn list_ongoing(root: &Path) -> Result<Vec<SpecStatus>> {
    let ongoing = paths::ongoing_dir(root);
    if !ongoing.is_dir() {
        return Ok(Vec::new());
    }
    let mut dirs = Vec::new();
    for entry in std::fs::read_dir(&ongoing)? {
        let path = entry?.path();
        if path.is_dir() {
            dirs.push(path);
        }
    }
    dirs.sort();
    Ok(dirs.iter().map(|d| SpecStatus::read(d)).collect())
}

/// Pick the spec an operator meant.
///
/// With a name: the first exact or `-<name>` suffix match. Without one:
/// the only ongoing spec. Anything else is an error listing the candidates.
pub fn resolve_spec(mut specs: Vec<SpecStatus>, name: Option<&str>) -> Result<SpecStatus> {
    if specs.is_empty() {
        return Err(SpeksiError::NoOngoingSpecs);
    }
    let available = |specs: &[SpecStatus]| -> Vec<String> {
        specs
            .iter()
            .map(|s| format!("{} ({})", s.name, s.phase))
            .collect()
    };

    match name {
        Some(query) => match specs.iter().position(|s| s.matches(query)) {
            Some(i) => Ok(specs.swap_remove(i)),
            None => Err(SpeksiError::SpecNotFound {
                name: query.to_string(),
                available: available(&specs),
            }),
        },
        None if specs.len() == 1 => Ok(specs.swap_remove(0)),
        None => Err(SpeksiError::AmbiguousSpec {
            available: available(&specs),
        }),
    }
}

/// The story an operator meant, or the first one with unchecked tasks when
/// no query is given.
pub fn resolve_story<'a>(
    spec: &'a SpecStatus,
    query: Option<&str>,
) -> Result<Option<&'a StoryStatus>> {
    match query {
        Some(q) => spec.find_story(q).map(Some),
        None => Ok(spec.first_pending_story()),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
