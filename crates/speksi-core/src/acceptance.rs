//! Acceptance gate.
//!
//! Each phase except codify and docufy names the documents that must carry
//! `**Status**: Accepted` before the spec can leave it. The query side is
//! pure; the accept side flips markers in place and mirrors the change into
//! the spec's `index.md`.

use crate::config::Config;
use crate::doc_status::accept_marker;
use crate::error::Result;
use crate::io;
use crate::paths;
use crate::spec::SpecStatus;
use crate::types::{DocKind, DocStatus, Phase};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// AcceptanceTarget
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AcceptanceTarget {
    pub label: &'static str,
    pub description: &'static str,
    pub proposal: bool,
    pub functional_specs: bool,
    pub technical_specs: bool,
    pub tasks: bool,
}

const NONE: AcceptanceTarget = AcceptanceTarget {
    label: "",
    description: "",
    proposal: false,
    functional_specs: false,
    technical_specs: false,
    tasks: false,
};

/// What must be accepted to leave `phase`. Codify and docufy have no gate.
pub fn acceptance_target(phase: Phase) -> Option<AcceptanceTarget> {
    let target = match phase {
        Phase::Proposal => AcceptanceTarget {
            label: "proposal",
            description: "Accept proposal before storify",
            proposal: true,
            ..NONE
        },
        Phase::Storify => AcceptanceTarget {
            label: "functional specs",
            description: "Accept all functional specs to advance past storify",
            functional_specs: true,
            ..NONE
        },
        Phase::Research => AcceptanceTarget {
            label: "functional specs + proposal",
            description: "Accept proposal and all functional specs to proceed to techify",
            proposal: true,
            functional_specs: true,
            ..NONE
        },
        Phase::Techify => AcceptanceTarget {
            label: "technical specs",
            description: "Accept all technical specs to proceed to taskify",
            technical_specs: true,
            ..NONE
        },
        Phase::Taskify => AcceptanceTarget {
            label: "tasks",
            description: "Accept all tasks to proceed to codify",
            tasks: true,
            ..NONE
        },
        Phase::Codify | Phase::Docufy => return None,
    };
    Some(target)
}

// ---------------------------------------------------------------------------
// AcceptanceStatus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcceptanceStatus {
    pub spec: String,
    pub phase: Phase,
    pub auto_confirm: bool,
    pub acceptance_target: Option<String>,
    pub description: String,
    pub files_to_accept: Vec<PathBuf>,
    pub already_accepted: Vec<PathBuf>,
}

impl AcceptanceStatus {
    pub fn satisfied(&self) -> bool {
        self.files_to_accept.is_empty()
    }
}

#[derive(Default)]
struct Partition {
    to_accept: Vec<PathBuf>,
    accepted: Vec<PathBuf>,
}

impl Partition {
    /// Absent documents land in neither list.
    fn push(&mut self, path: PathBuf, status: DocStatus) {
        match status {
            DocStatus::Accepted => self.accepted.push(path),
            DocStatus::Draft => self.to_accept.push(path),
            DocStatus::Empty => {}
        }
    }
}

/// Documents gating the spec's current phase, split by acceptance.
/// Reads only the snapshot; nothing on disk is touched.
pub fn acceptance_status(spec: &SpecStatus, config: &Config) -> AcceptanceStatus {
    let Some(target) = acceptance_target(spec.phase) else {
        return AcceptanceStatus {
            spec: spec.name.clone(),
            phase: spec.phase,
            auto_confirm: config.auto_confirm,
            acceptance_target: None,
            description: format!("No acceptance action for phase: {}", spec.phase),
            files_to_accept: Vec::new(),
            already_accepted: Vec::new(),
        };
    };

    let mut part = Partition::default();
    if target.proposal {
        part.push(spec.doc_path(DocKind::Proposal), spec.proposal_status);
    }
    let story_kinds = [
        (target.functional_specs, DocKind::FunctionalSpec),
        (target.technical_specs, DocKind::TechnicalSpec),
        (target.tasks, DocKind::Tasks),
    ];
    for (wanted, kind) in story_kinds {
        if !wanted {
            continue;
        }
        for story in &spec.stories {
            part.push(spec.story_doc_path(story, kind), story.doc_status(kind));
        }
    }

    AcceptanceStatus {
        spec: spec.name.clone(),
        phase: spec.phase,
        auto_confirm: config.auto_confirm,
        acceptance_target: Some(target.label.to_string()),
        description: target.description.to_string(),
        files_to_accept: part.to_accept,
        already_accepted: part.accepted,
    }
}

// ---------------------------------------------------------------------------
// Mutations
// ---------------------------------------------------------------------------

/// Flip the document's status marker to Accepted.
/// Returns false when the file is missing or its marker does not read Draft.
pub fn accept_file(path: &Path) -> Result<bool> {
    io::rewrite_if_changed(path, |content| match accept_marker(content) {
        Cow::Owned(updated) => Some(updated),
        Cow::Borrowed(_) => None,
    })
}

/// Mark `file`'s bullet in `index` as accepted:
/// `- [Draft] [name](rel/path)` becomes `- [Accepted] [name](rel/path)`.
pub fn update_index_entry(index: &Path, file: &Path, spec_dir: &Path) -> Result<bool> {
    let filename = file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let rel = paths::relative_slash(file, spec_dir);
    let old = format!("- [Draft] [{filename}]({rel})");
    let new = format!("- [Accepted] [{filename}]({rel})");

    io::rewrite_if_changed(index, |content| {
        content.contains(&old).then(|| content.replace(&old, &new))
    })
}

/// Per-file result of [`accept_files`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcceptOutcome {
    pub path: PathBuf,
    /// The document's marker was flipped by this call.
    pub accepted: bool,
    /// The index bullet was flipped by this call.
    pub index_updated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Accept every file in `files`, mirroring each into `<spec_dir>/index.md`.
///
/// Best effort: a failure on one file is recorded in its outcome and the
/// batch continues. Running it again on accepted files changes nothing.
pub fn accept_files(spec_dir: &Path, files: &[PathBuf]) -> Vec<AcceptOutcome> {
    let index = paths::spec_doc(spec_dir, DocKind::Index);
    files
        .iter()
        .map(|file| {
            let mut errors = Vec::new();
            let accepted = accept_file(file).unwrap_or_else(|e| {
                tracing::warn!(path = %file.display(), error = %e, "failed to accept document");
                errors.push(e.to_string());
                false
            });
            let index_updated = update_index_entry(&index, file, spec_dir).unwrap_or_else(|e| {
                tracing::warn!(path = %index.display(), error = %e, "failed to update index entry");
                errors.push(e.to_string());
                false
            });
            tracing::debug!(path = %file.display(), accepted, index_updated, "accept");
            AcceptOutcome {
                path: file.clone(),
                accepted,
                index_updated,
                error: (!errors.is_empty()).then(|| errors.join("; ")),
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
