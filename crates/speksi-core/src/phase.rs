//! Phase detection.
//!
//! The current phase is never stored. It is recomputed from the tree on
//! every call by walking an ordered list of exit checks; the first check a
//! spec fails names its phase. A spec that passes every check is ready for
//! docufy.

use crate::doc_status::read_doc_status;
use crate::paths;
use crate::story::{list_stories, StoryStatus};
use crate::types::{DocKind, DocStatus, Phase};
use std::path::Path;

// ---------------------------------------------------------------------------
// SpecFacts
// ---------------------------------------------------------------------------

/// Everything phase detection looks at, gathered from one spec directory.
#[derive(Debug, Clone)]
pub struct SpecFacts<'a> {
    pub proposal: DocStatus,
    pub has_index: bool,
    pub has_research: bool,
    pub stories: &'a [StoryStatus],
}

impl SpecFacts<'_> {
    fn all_stories(&self, pred: impl Fn(&StoryStatus) -> bool) -> bool {
        self.stories.iter().all(pred)
    }
}

// ---------------------------------------------------------------------------
// Checks
// ---------------------------------------------------------------------------

/// One exit condition. While `passes` is false the spec stays in `phase`.
#[derive(Clone, Copy)]
pub struct Check {
    pub id: &'static str,
    pub passes: fn(&SpecFacts) -> bool,
    pub phase: Phase,
    pub message: &'static str,
}

/// Exit checks in evaluation order.
pub fn checks() -> Vec<Check> {
    vec![
        Check {
            id: "proposal_exists",
            passes: |f| f.proposal != DocStatus::Empty,
            phase: Phase::Proposal,
            message: "proposal.md does not exist",
        },
        Check {
            id: "proposal_accepted",
            passes: |f| f.proposal.is_accepted(),
            phase: Phase::Proposal,
            message: "proposal.md is not accepted",
        },
        Check {
            id: "index_exists",
            passes: |f| f.has_index,
            phase: Phase::Storify,
            message: "index.md does not exist",
        },
        Check {
            id: "stories_exist",
            passes: |f| !f.stories.is_empty(),
            phase: Phase::Storify,
            message: "no stories under specs/",
        },
        Check {
            id: "functional_specs_accepted",
            passes: |f| f.all_stories(|s| s.functional_spec_status.is_accepted()),
            phase: Phase::Storify,
            message: "not every functional spec is accepted",
        },
        Check {
            id: "research_exists",
            passes: |f| f.has_research,
            phase: Phase::Research,
            message: "research.md does not exist",
        },
        Check {
            id: "technical_specs_accepted",
            passes: |f| f.all_stories(|s| s.technical_spec_status.is_accepted()),
            phase: Phase::Techify,
            message: "not every technical spec is accepted",
        },
        Check {
            id: "tasks_accepted",
            passes: |f| f.all_stories(|s| s.tasks_status.is_accepted()),
            phase: Phase::Taskify,
            message: "not every tasks.md is accepted",
        },
        Check {
            // Zero tasks counts as unfinished so a story cannot skip implementation.
            id: "tasks_complete",
            passes: |f| f.all_stories(|s| s.counts().is_complete()),
            phase: Phase::Codify,
            message: "not every story has all of its tasks checked",
        },
    ]
}

/// First failing check, or `None` when the spec is ready for docufy.
pub fn blocking_check(facts: &SpecFacts) -> Option<Check> {
    checks().into_iter().find(|c| !(c.passes)(facts))
}

pub fn classify(facts: &SpecFacts) -> Phase {
    blocking_check(facts).map_or(Phase::Docufy, |c| c.phase)
}

/// Detect the phase of the spec at `spec_dir` from scratch.
pub fn detect_phase(spec_dir: &Path) -> Phase {
    let stories = list_stories(spec_dir);
    let facts = SpecFacts {
        proposal: read_doc_status(&paths::spec_doc(spec_dir, DocKind::Proposal)),
        has_index: paths::spec_doc(spec_dir, DocKind::Index).exists(),
        has_research: paths::spec_doc(spec_dir, DocKind::Research).exists(),
        stories: &stories,
    };
    classify(&facts)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
