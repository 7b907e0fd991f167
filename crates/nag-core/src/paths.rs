use crate::error::{NagError, Result};
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Location constants (relative to $HOME)
// ---------------------------------------------------------------------------

pub const XDG_CONFIG_FILE: &str = ".config/nag_runner.json";
pub const DOT_CONFIG_FILE: &str = ".nag_runner.json";
pub const LAST_RUN_FILE: &str = ".cache/nag_runner/last_run.json";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn home_dir() -> Result<PathBuf> {
    home::home_dir().ok_or(NagError::HomeNotFound)
}

/// Config files probed when no explicit path is given, in priority order.
pub fn config_candidates(home: &Path) -> Vec<PathBuf> {
    vec![home.join(XDG_CONFIG_FILE), home.join(DOT_CONFIG_FILE)]
}

pub fn default_last_run_path(home: &Path) -> PathBuf {
    home.join(LAST_RUN_FILE)
}

/// Resolve the config file.
///
/// An explicit path is returned as-is (a missing file is reported when it is
/// read). Otherwise the first existing default candidate wins.
pub fn resolve_config_path(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(p) = explicit {
        return Ok(p.to_path_buf());
    }
    find_config_in(&home_dir()?)
}

pub fn find_config_in(home: &Path) -> Result<PathBuf> {
    let candidates = config_candidates(home);
    if let Some(found) = candidates.iter().find(|p| p.is_file()) {
        return Ok(found.clone());
    }
    let listed = candidates
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ");
    Err(NagError::ConfigNotFound(listed))
}

pub fn resolve_last_run_path(explicit: Option<&Path>) -> Result<PathBuf> {
    match explicit {
        Some(p) => Ok(p.to_path_buf()),
        None => Ok(default_last_run_path(&home_dir()?)),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
