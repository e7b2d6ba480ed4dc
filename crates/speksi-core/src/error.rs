use thiserror::Error;

#[derive(Debug, Error)]
pub enum SpeksiError {
    #[error("no ongoing specs found: run 'ana-speksi new' first")]
    NoOngoingSpecs,

    #[error("spec not found: {} (available: {})", .name, .available.join(", "))]
    SpecNotFound { name: String, available: Vec<String> },

    #[error("multiple ongoing specs found, specify one of: {}", .available.join(", "))]
    AmbiguousSpec { available: Vec<String> },

    #[error("story not found in spec '{spec}': {story}")]
    StoryNotFound { spec: String, story: String },

    #[error("spec already exists: {0}")]
    SpecExists(String),

    #[error("archive already exists: {0}")]
    ArchiveExists(String),

    #[error("invalid spec name '{0}': could not derive a slug, pass --name")]
    InvalidName(String),

    #[error("invalid ticket '{0}': must be non-empty without '/', '\\' or '..'")]
    InvalidTicket(String),

    #[error("invalid phase: {0}")]
    InvalidPhase(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, SpeksiError>;
