//! File I/O for session persistence
//!
//! Sessions are stored as JSON, by default in `~/.config/tilepane/session.json`
//! (overridable with the `session_file` config option).

use super::SessionState;
use anyhow::{Context, Result};
use std::path::Path;
use tilepane_config::Config;

/// Save session state to the location configured in `config`
pub fn save_session(state: &SessionState, config: &Config) -> Result<()> {
    save_session_to(state, &config.session_path())
}

/// Save session state to a specific file
pub fn save_session_to(state: &SessionState, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create session directory {:?}", parent))?;
    }

    let contents =
        serde_json::to_string_pretty(state).context("Failed to serialize session state")?;

    // Write to a sibling file first so a crash never leaves a truncated session
    let temp_path = path.with_extension("json.tmp");
    std::fs::write(&temp_path, contents)
        .with_context(|| format!("Failed to write session state to {:?}", temp_path))?;
    std::fs::rename(&temp_path, path)
        .with_context(|| format!("Failed to move session state into {:?}", path))?;

    log::info!(
        "Saved session state ({} workspaces) to {:?}",
        state.workspaces.len(),
        path
    );
    Ok(())
}

/// Load session state from the location configured in `config`
///
/// Returns `None` if the file doesn't exist or is empty.
/// Returns an error if the file exists but is corrupt.
pub fn load_session(config: &Config) -> Result<Option<SessionState>> {
    load_session_from(&config.session_path())
}

/// Load session state from a specific file
pub fn load_session_from(path: &Path) -> Result<Option<SessionState>> {
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read session state from {:?}", path))?;

    if contents.trim().is_empty() {
        return Ok(None);
    }

    let state: SessionState = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse session state from {:?}", path))?;

    log::info!(
        "Loaded session state ({} workspaces) from {:?}",
        state.workspaces.len(),
        path
    );
    Ok(Some(state))
}

/// Remove a session file (e.g., after the user opts out of restore)
pub fn clear_session_at(path: &Path) -> Result<()> {
    if path.exists() {
        std::fs::remove_file(path)
            .with_context(|| format!("Failed to remove session state file {:?}", path))?;
    }
    Ok(())
}
