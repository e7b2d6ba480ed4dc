pub mod accept;
pub mod archive;
pub mod continue_cmd;
pub mod init;
pub mod new;
pub mod next;
pub mod status;
pub mod sync_counts;
pub mod truth;

use anyhow::Context;
use speksi_core::spec::{list_ongoing, resolve_spec, SpecStatus};
use std::path::Path;

/// Snapshot the ongoing specs and pick the one `name` refers to.
pub(crate) fn load_spec(root: &Path, name: Option<&str>) -> anyhow::Result<SpecStatus> {
    let specs = list_ongoing(root).context("failed to list ongoing specs")?;
    Ok(resolve_spec(specs, name)?)
}
