use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Phase
// ---------------------------------------------------------------------------

/// Workflow phase of a spec. Declaration order is workflow order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Proposal,
    Storify,
    Research,
    Techify,
    Taskify,
    Codify,
    Docufy,
}

impl Phase {
    pub fn all() -> &'static [Phase] {
        &[
            Phase::Proposal,
            Phase::Storify,
            Phase::Research,
            Phase::Techify,
            Phase::Taskify,
            Phase::Codify,
            Phase::Docufy,
        ]
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn next(self) -> Option<Phase> {
        Phase::all().get(self.index() + 1).copied()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Proposal => "proposal",
            Phase::Storify => "storify",
            Phase::Research => "research",
            Phase::Techify => "techify",
            Phase::Taskify => "taskify",
            Phase::Codify => "codify",
            Phase::Docufy => "docufy",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Phase::Proposal => "Create high-level proposal (proposal.md)",
            Phase::Storify => "Create functional specifications per user story",
            Phase::Research => "Conduct technical research and create technical specs",
            Phase::Techify => "Create technical specifications per story",
            Phase::Taskify => "Create implementation tasks per story",
            Phase::Codify => "Implement code changes based on tasks",
            Phase::Docufy => "Archive completed spec and update ground truth",
        }
    }

    /// Name of the agent skill that carries out this phase.
    pub fn skill(self) -> &'static str {
        match self {
            Phase::Proposal => "as-new",
            Phase::Storify => "as-storify",
            Phase::Research | Phase::Techify => "as-techify",
            Phase::Taskify => "as-taskify",
            Phase::Codify => "as-codify",
            Phase::Docufy => "as-docufy",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Phase {
    type Err = crate::error::SpeksiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Phase::all()
            .iter()
            .copied()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| crate::error::SpeksiError::InvalidPhase(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// DocStatus
// ---------------------------------------------------------------------------

/// Status of a single status-bearing document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocStatus {
    #[serde(rename = "empty")]
    Empty,
    Draft,
    Accepted,
}

impl DocStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            DocStatus::Empty => "empty",
            DocStatus::Draft => "Draft",
            DocStatus::Accepted => "Accepted",
        }
    }

    pub fn is_accepted(self) -> bool {
        self == DocStatus::Accepted
    }
}

impl fmt::Display for DocStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// DocKind
// ---------------------------------------------------------------------------

/// Well-known documents of a spec or of one of its stories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocKind {
    Proposal,
    Index,
    Research,
    FunctionalSpec,
    TechnicalSpec,
    DataModel,
    ApiContract,
    TestAutomationPlan,
    ManualTestingPlan,
    Tasks,
}

impl DocKind {
    /// Documents that live inside a story folder, in display order.
    pub fn story_docs() -> &'static [DocKind] {
        &[
            DocKind::FunctionalSpec,
            DocKind::TechnicalSpec,
            DocKind::Tasks,
            DocKind::DataModel,
            DocKind::ApiContract,
            DocKind::TestAutomationPlan,
            DocKind::ManualTestingPlan,
        ]
    }

    pub fn filename(self) -> &'static str {
        match self {
            DocKind::Proposal => "proposal.md",
            DocKind::Index => "index.md",
            DocKind::Research => "research.md",
            DocKind::FunctionalSpec => "functional-spec.md",
            DocKind::TechnicalSpec => "technical-spec.md",
            DocKind::DataModel => "data-model.md",
            DocKind::ApiContract => "api-contract.md",
            DocKind::TestAutomationPlan => "test-automation-plan.md",
            DocKind::ManualTestingPlan => "manual-testing-plan.md",
            DocKind::Tasks => "tasks.md",
        }
    }

    pub fn from_filename(name: &str) -> Option<DocKind> {
        [
            DocKind::Proposal,
            DocKind::Index,
            DocKind::Research,
            DocKind::FunctionalSpec,
            DocKind::TechnicalSpec,
            DocKind::DataModel,
            DocKind::ApiContract,
            DocKind::TestAutomationPlan,
            DocKind::ManualTestingPlan,
            DocKind::Tasks,
        ]
        .into_iter()
        .find(|k| k.filename() == name)
    }

    pub fn description(self) -> &'static str {
        match self {
            DocKind::Proposal => "High-level proposal for the change",
            DocKind::Index => "Summary index of stories and document status",
            DocKind::Research => "Technical research notes",
            DocKind::FunctionalSpec => "User story requirements and acceptance criteria",
            DocKind::TechnicalSpec => "Technical design and implementation strategy",
            DocKind::DataModel => "Data structures and database schema",
            DocKind::ApiContract => "API endpoints, request/response formats",
            DocKind::TestAutomationPlan => "Automated testing strategy and test cases",
            DocKind::ManualTestingPlan => "Manual testing procedures and scenarios",
            DocKind::Tasks => "Implementation tasks checklist (track progress here)",
        }
    }
}

impl fmt::Display for DocKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.filename())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
