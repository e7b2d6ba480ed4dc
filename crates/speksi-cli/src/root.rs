use speksi_core::paths;
use std::path::{Path, PathBuf};

/// Resolve the ana-speksi directory.
///
/// Priority:
/// 1. `--root` flag / `ANA_SPEKSI_ROOT` env var (passed in as `explicit`)
/// 2. Nearest `ana-speksi/` walking upward from `cwd`
/// 3. `cwd/ana-speksi`
pub fn resolve_root(explicit: Option<&Path>) -> PathBuf {
    if let Some(p) = explicit {
        return p.to_path_buf();
    }
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    paths::find_root(&cwd)
}
