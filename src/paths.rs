//! Centralized path resolution for listctl
//!
//! # Environment Variables
//!
//! - `LISTCTL_STATE_DIR` - Override state directory
//! - `LISTCTL_BACKEND_DIR` - Override the file backend root
//!
//! # Path Resolution Priority
//!
//! For state_dir():
//! 1. `LISTCTL_STATE_DIR` environment variable
//! 2. `XDG_STATE_HOME/listctl` (if set)
//! 3. Platform default:
//!    - Windows: `%LOCALAPPDATA%\listctl`
//!    - macOS/Linux: `~/.local/state/listctl`
//!
//! For backend_dir():
//! 1. `LISTCTL_BACKEND_DIR` environment variable
//! 2. `XDG_DATA_HOME/listctl/backend` (if set)
//! 3. Platform default: `<data dir>/listctl/backend`

use anyhow::{Context, Result};
use std::path::PathBuf;

/// Environment variable for state directory override
pub const ENV_STATE_DIR: &str = "LISTCTL_STATE_DIR";

/// Environment variable for file backend directory override
pub const ENV_BACKEND_DIR: &str = "LISTCTL_BACKEND_DIR";

/// Get the listctl state directory path
pub fn state_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var(ENV_STATE_DIR) {
        let path = expand(&dir);
        log::debug!("Using state dir from {}: {}", ENV_STATE_DIR, path.display());
        return Ok(path);
    }

    if let Ok(xdg_state) = std::env::var("XDG_STATE_HOME") {
        let path = PathBuf::from(xdg_state).join("listctl");
        log::debug!("Using XDG_STATE_HOME: {}", path.display());
        return Ok(path);
    }

    #[cfg(windows)]
    {
        if let Some(local_app_data) = dirs::data_local_dir() {
            let path = local_app_data.join("listctl");
            log::debug!("Using Windows state dir: {}", path.display());
            return Ok(path);
        }
    }

    let home = dirs::home_dir().context("Could not determine home directory")?;
    let path = home.join(".local").join("state").join("listctl");
    log::debug!("Using default state dir: {}", path.display());
    Ok(path)
}

/// Get the root directory of the file backend
pub fn backend_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var(ENV_BACKEND_DIR) {
        let path = expand(&dir);
        log::debug!("Using backend dir from {}: {}", ENV_BACKEND_DIR, path.display());
        return Ok(path);
    }

    if let Ok(xdg_data) = std::env::var("XDG_DATA_HOME") {
        let path = PathBuf::from(xdg_data).join("listctl").join("backend");
        log::debug!("Using XDG_DATA_HOME: {}", path.display());
        return Ok(path);
    }

    let data = dirs::data_dir().context("Could not determine data directory")?;
    let path = data.join("listctl").join("backend");
    log::debug!("Using default backend dir: {}", path.display());
    Ok(path)
}

/// Expand ~ and environment variables in a path string.
pub fn expand(path: &str) -> PathBuf {
    let expanded = shellexpand::full(path).unwrap_or(std::borrow::Cow::Borrowed(path));
    PathBuf::from(expanded.as_ref())
}

// ============================================================================
// Tests
// ============================================================================
