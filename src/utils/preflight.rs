//! Preflight validation checks for early failure detection.
//!
//! Commands call these before doing any work so environment problems
//! surface as a single clear error.

use anyhow::{Context, Result};

/// Validates that the current directory is inside a git repository.
pub fn check_git_repository() -> Result<()> {
    crate::git::GitRepository::open().context(
        "Not in a git repository. Please run this command from within a git repository.",
    )?;
    Ok(())
}

