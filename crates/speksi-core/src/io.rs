//! Whole-file writes for documents under the ana-speksi tree.

use crate::error::Result;
use std::io::Write;
use std::path::Path;

/// Staged copies are dot-files without an `.md` extension, so a listing
/// taken mid-write never mistakes one for a document.
const STAGING_PREFIX: &str = ".speksi-";

/// Replace `path` with `data` in one rename.
///
/// The new bytes are staged and synced next to the target first; after a
/// crash the document holds either its old or its new text.
pub fn atomic_write(path: &Path, data: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;
    let mut staged = tempfile::Builder::new()
        .prefix(STAGING_PREFIX)
        .tempfile_in(dir)?;
    staged.write_all(data)?;
    staged.as_file().sync_all()?;
    staged.persist(path).map_err(|e| e.error)?;
    Ok(())
}

pub fn ensure_dir(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path)?;
    Ok(())
}

/// Seed `path` with `data` unless something is already there.
/// Returns whether the file was created.
pub fn write_if_missing(path: &Path, data: &[u8]) -> Result<bool> {
    let created = !path.exists();
    if created {
        atomic_write(path, data)?;
    }
    Ok(created)
}

/// Read `path`, apply `edit`, and write the result back only when the text
/// changed. Returns `Ok(false)` when the file is missing or `edit` declined.
///
/// Skipping the write keeps the file's mtime stable on no-op edits.
pub fn rewrite_if_changed<F>(path: &Path, edit: F) -> Result<bool>
where
    F: FnOnce(&str) -> Option<String>,
{
    if !path.exists() {
        return Ok(false);
    }
    let content = std::fs::read_to_string(path)?;
    match edit(&content) {
        Some(updated) if updated != content => {
            atomic_write(path, updated.as_bytes())?;
            Ok(true)
        }
        _ => Ok(false),
    }
}
