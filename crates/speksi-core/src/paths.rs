use crate::error::Result;
use crate::io;
use crate::types::DocKind;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const ROOT_DIR: &str = "ana-speksi";
pub const ONGOING_DIR: &str = "ongoing";
pub const TRUTH_DIR: &str = "truth";
pub const ARCHIVE_DIR: &str = "archive";
pub const TECHNICAL_DEBT_DIR: &str = "technical-debt";

pub const TRUTH_DATA_MODELS_DIR: &str = "data-models";
pub const TRUTH_ENUMS_DIR: &str = "enums";

/// Story container inside a spec directory.
pub const STORIES_DIR: &str = "specs";

pub const CONFIG_FILE: &str = "config.yaml";
pub const GITKEEP: &str = ".gitkeep";

pub const SUBDIRS: &[&str] = &[ONGOING_DIR, TRUTH_DIR, ARCHIVE_DIR, TECHNICAL_DEBT_DIR];

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn ongoing_dir(root: &Path) -> PathBuf {
    root.join(ONGOING_DIR)
}

pub fn archive_dir(root: &Path) -> PathBuf {
    root.join(ARCHIVE_DIR)
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

pub fn spec_dir(root: &Path, name: &str) -> PathBuf {
    ongoing_dir(root).join(name)
}

pub fn spec_doc(spec_dir: &Path, kind: DocKind) -> PathBuf {
    spec_dir.join(kind.filename())
}

pub fn stories_dir(spec_dir: &Path) -> PathBuf {
    spec_dir.join(STORIES_DIR)
}

pub fn story_dir(spec_dir: &Path, folder: &str) -> PathBuf {
    stories_dir(spec_dir).join(folder)
}

pub fn story_doc(spec_dir: &Path, folder: &str, kind: DocKind) -> PathBuf {
    story_dir(spec_dir, folder).join(kind.filename())
}

/// `path` relative to `base`, joined with `/` regardless of platform.
///
/// Falls back to the full path when `path` is not under `base`.
pub fn relative_slash(path: &Path, base: &Path) -> String {
    let rel = path.strip_prefix(base).unwrap_or(path);
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

// ---------------------------------------------------------------------------
// Root discovery and layout
// ---------------------------------------------------------------------------

/// Walk upward from `start` looking for an `ana-speksi/` directory.
///
/// Falls back to `start/ana-speksi` when none is found.
pub fn find_root(start: &Path) -> PathBuf {
    let mut dir = start.to_path_buf();
    loop {
        let candidate = dir.join(ROOT_DIR);
        if candidate.is_dir() {
            return candidate;
        }
        match dir.parent() {
            Some(p) => dir = p.to_path_buf(),
            None => break,
        }
    }
    start.join(ROOT_DIR)
}

/// Create every sub-directory of the layout, each with a `.gitkeep`.
/// Returns the directories that were created or already present.
pub fn ensure_dirs(root: &Path) -> Result<Vec<PathBuf>> {
    let mut dirs: Vec<PathBuf> = SUBDIRS.iter().map(|s| root.join(s)).collect();
    for truth_sub in [TRUTH_DATA_MODELS_DIR, TRUTH_ENUMS_DIR] {
        dirs.push(root.join(TRUTH_DIR).join(truth_sub));
    }
    for d in &dirs {
        io::ensure_dir(d)?;
        io::write_if_missing(&d.join(GITKEEP), b"")?;
    }
    Ok(dirs)
}

// ---------------------------------------------------------------------------
// Ground truth
// ---------------------------------------------------------------------------

/// One file or directory under `truth/`, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TruthEntry {
    /// Path relative to `truth/`, `/`-separated.
    pub path: String,
    pub name: String,
    pub depth: usize,
    pub is_dir: bool,
}

/// Depth-first listing of `<root>/truth`, each level sorted by name.
///
/// `.gitkeep` placeholders are skipped. A missing directory lists nothing.
pub fn truth_tree(root: &Path) -> Result<Vec<TruthEntry>> {
    let truth = root.join(TRUTH_DIR);
    let mut entries = Vec::new();
    if truth.is_dir() {
        walk_truth(&truth, &truth, 0, &mut entries)?;
    }
    Ok(entries)
}

fn walk_truth(base: &Path, dir: &Path, depth: usize, out: &mut Vec<TruthEntry>) -> Result<()> {
    let mut children = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.file_name().is_some_and(|n| n == GITKEEP) {
            continue;
        }
        children.push(path);
    }
    children.sort();

    for child in children {
        let is_dir = child.is_dir();
        out.push(TruthEntry {
            path: relative_slash(&child, base),
            name: child
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            depth,
            is_dir,
        });
        if is_dir {
            walk_truth(base, &child, depth + 1, out)?;
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Naming
// ---------------------------------------------------------------------------

static NON_SLUG_RE: OnceLock<Regex> = OnceLock::new();
static SEPARATOR_RE: OnceLock<Regex> = OnceLock::new();
static DASHES_RE: OnceLock<Regex> = OnceLock::new();

fn non_slug_re() -> &'static Regex {
    NON_SLUG_RE.get_or_init(|| Regex::new(r"[^a-z0-9\s-]").unwrap())
}

fn separator_re() -> &'static Regex {
    SEPARATOR_RE.get_or_init(|| Regex::new(r"[\s_]+").unwrap())
}

fn dashes_re() -> &'static Regex {
    DASHES_RE.get_or_init(|| Regex::new(r"-+").unwrap())
}

/// Convert free text to a kebab-case slug.
pub fn slugify(text: &str) -> String {
    let lowered = text.trim().to_lowercase();
    let cleaned = non_slug_re().replace_all(&lowered, "");
    let dashed = separator_re().replace_all(&cleaned, "-");
    let collapsed = dashes_re().replace_all(&dashed, "-");
    collapsed.trim_matches('-').to_string()
}

/// Spec folder name: `<ticket>.<short-name>`.
pub fn spec_name(ticket_id: &str, short_name: &str) -> String {
    format!("{ticket_id}.{short_name}")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
