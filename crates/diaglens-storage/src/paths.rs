//! Path utilities for diaglens directory resolution.

use std::path::PathBuf;

use anyhow::Result;

const DIAGLENS_DIR: &str = ".diaglens";
const DB_FILE: &str = "diaglens.db";

/// Environment variable to override the diaglens directory.
const DIAGLENS_DIR_ENV: &str = "DIAGLENS_DIR";

/// Resolve the diaglens data directory.
/// Priority: DIAGLENS_DIR env var > ~/.diaglens/
pub fn resolve_diaglens_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var(DIAGLENS_DIR_ENV)
        && !dir.trim().is_empty()
    {
        return Ok(PathBuf::from(dir));
    }
    dirs::home_dir()
        .map(|h| h.join(DIAGLENS_DIR))
        .ok_or_else(|| anyhow::anyhow!("Failed to determine home directory"))
}

/// Ensure the diaglens directory exists and return its path.
pub fn ensure_diaglens_dir() -> Result<PathBuf> {
    let dir = resolve_diaglens_dir()?;
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Database file path: ~/.diaglens/diaglens.db
pub fn database_path() -> Result<PathBuf> {
    Ok(resolve_diaglens_dir()?.join(DB_FILE))
}
