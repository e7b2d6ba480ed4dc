//! Workspace lifecycle: set up the layout, open a new spec, archive a
//! finished one.

use crate::config::DEFAULT_CONFIG_YAML;
use crate::error::{Result, SpeksiError};
use crate::io;
use crate::paths;
use crate::spec::SpecStatus;
use crate::types::DocKind;
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// What `init` did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitReport {
    pub root: PathBuf,
    pub dirs: Vec<PathBuf>,
    pub config_created: bool,
}

/// Create the directory layout under `root` and a default `config.yaml`.
/// Safe to run again; existing files are left alone.
pub fn init(root: &Path) -> Result<InitReport> {
    let dirs = paths::ensure_dirs(root)?;
    let config_created =
        io::write_if_missing(&paths::config_path(root), DEFAULT_CONFIG_YAML.as_bytes())?;
    Ok(InitReport {
        root: root.to_path_buf(),
        dirs,
        config_created,
    })
}

fn proposal_skeleton(name: &str, ticket: &str, date: NaiveDate, prompt: &str) -> String {
    let prompt = prompt.trim();
    let why = if prompt.is_empty() {
        "<!-- Why is this change needed? -->"
    } else {
        prompt
    };
    format!(
        "\
# Proposal: {name}

**Ticket**: {ticket}
**Created**: {date}
**Status**: Draft

## Why

{why}

## What Changes

<!-- Bullet list of the user-visible changes. -->

## Impact

<!-- Affected code, systems and teams. -->
"
    )
}

/// Open `ongoing/<ticket>.<slug>/` with a draft `proposal.md`.
///
/// The slug comes from `short_name` when given, otherwise from `description`.
pub fn create_spec(
    root: &Path,
    ticket: &str,
    description: &str,
    short_name: Option<&str>,
) -> Result<PathBuf> {
    let ticket = ticket.trim();
    if ticket.is_empty() || ticket.contains(['/', '\\']) || ticket.contains("..") {
        return Err(SpeksiError::InvalidTicket(ticket.to_string()));
    }
    let source = short_name.unwrap_or(description);
    let slug = paths::slugify(source);
    if slug.is_empty() {
        return Err(SpeksiError::InvalidName(source.to_string()));
    }

    let name = paths::spec_name(ticket, &slug);
    let dir = paths::spec_dir(root, &name);
    if dir.exists() {
        return Err(SpeksiError::SpecExists(name));
    }

    paths::ensure_dirs(root)?;
    io::ensure_dir(&dir)?;
    let today = Local::now().date_naive();
    let proposal = proposal_skeleton(&name, ticket, today, description);
    io::atomic_write(&paths::spec_doc(&dir, DocKind::Proposal), proposal.as_bytes())?;
    tracing::debug!(spec = %name, "created spec");
    Ok(dir)
}

/// Move a spec out of `ongoing/` into `archive/<YYYY-MM-DD>-<name>`.
pub fn archive_spec(root: &Path, spec: &SpecStatus) -> Result<PathBuf> {
    let today = Local::now().date_naive();
    archive_spec_on(root, spec, today)
}

fn archive_spec_on(root: &Path, spec: &SpecStatus, date: NaiveDate) -> Result<PathBuf> {
    let archive = paths::archive_dir(root);
    let dest = archive.join(format!("{}-{}", date.format("%Y-%m-%d"), spec.name));
    if dest.exists() {
        return Err(SpeksiError::ArchiveExists(
            dest.file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
        ));
    }
    io::ensure_dir(&archive)?;
    std::fs::rename(&spec.path, &dest)?;
    tracing::debug!(spec = %spec.name, dest = %dest.display(), "archived spec");
    Ok(dest)
}
