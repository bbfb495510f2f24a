//! commit-msg hook installation
//!
//! The hook runs `diffmatch check HEAD` and either blocks the commit on a
//! non-zero exit (strict) or only prints a notice (advisory). Hooks that do
//! not carry the diffmatch marker are never touched without `force`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

/// Marker identifying a hook written by this tool.
pub const HOOK_MARKER: &str = "diffmatch";

/// Name of the hook file inside `<git-dir>/hooks`.
pub const HOOK_NAME: &str = "commit-msg";

/// Whether a failing audit blocks the commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookMode {
    /// Propagate the exit status; warnings block the commit.
    Strict,
    /// Print a notice and let the commit proceed.
    Advisory,
}

impl std::fmt::Display for HookMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Strict => write!(f, "strict (blocks commit)"),
            Self::Advisory => write!(f, "advisory (warns only)"),
        }
    }
}

/// Result of [`install_hook`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    /// The hook was written.
    Installed {
        /// Hook file path.
        path: PathBuf,
        /// Mode written into the script.
        mode: HookMode,
    },
    /// A diffmatch hook is already present; nothing changed.
    AlreadyInstalled {
        /// Hook file path.
        path: PathBuf,
    },
    /// A hook from another tool exists and `force` was not given.
    ForeignHookExists {
        /// Hook file path.
        path: PathBuf,
    },
}

/// Result of [`uninstall_hook`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UninstallOutcome {
    /// The diffmatch hook was removed.
    Removed {
        /// Removed hook file path.
        path: PathBuf,
    },
    /// No commit-msg hook exists.
    NotFound,
    /// The existing hook belongs to another tool and was left alone.
    Foreign {
        /// Hook file path.
        path: PathBuf,
    },
}

/// Returns the hook path for a `.git` directory.
pub fn hook_path(git_dir: &Path) -> PathBuf {
    git_dir.join("hooks").join(HOOK_NAME)
}

/// Renders the hook script invoking `executable`.
pub fn render_hook_script(executable: &Path, mode: HookMode) -> String {
    let exit_behavior = match mode {
        HookMode::Strict => "exit $result".to_string(),
        HookMode::Advisory => {
            "if [ $result -ne 0 ]; then echo \"  (diffmatch: warnings found, commit proceeding)\"; fi"
                .to_string()
        }
    };

    format!(
        "#!/bin/sh\n\
         # {HOOK_MARKER}: commit-diff auditor hook\n\
         # Installed by: {HOOK_MARKER} hook install\n\
         \n\
         \"{}\" check HEAD 2>&1\n\
         result=$?\n\
         {exit_behavior}\n",
        executable.display()
    )
}

/// Writes the commit-msg hook into `<git_dir>/hooks`.
pub fn install_hook(
    git_dir: &Path,
    executable: &Path,
    mode: HookMode,
    force: bool,
) -> Result<InstallOutcome> {
    let hooks_dir = git_dir.join("hooks");
    fs::create_dir_all(&hooks_dir)
        .with_context(|| format!("Failed to create hooks directory: {}", hooks_dir.display()))?;

    let path = hook_path(git_dir);
    if path.exists() {
        let existing = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read existing hook: {}", path.display()))?;
        if existing.contains(HOOK_MARKER) {
            return Ok(InstallOutcome::AlreadyInstalled { path });
        }
        if !force {
            return Ok(InstallOutcome::ForeignHookExists { path });
        }
        debug!(path = %path.display(), "Overwriting foreign hook");
    }

    fs::write(&path, render_hook_script(executable, mode))
        .with_context(|| format!("Failed to write hook: {}", path.display()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = fs::metadata(&path)?.permissions();
        perms.set_mode(perms.mode() | 0o111);
        fs::set_permissions(&path, perms)
            .with_context(|| format!("Failed to make hook executable: {}", path.display()))?;
    }

    Ok(InstallOutcome::Installed { path, mode })
}

/// Removes the commit-msg hook if it was written by this tool.
pub fn uninstall_hook(git_dir: &Path) -> Result<UninstallOutcome> {
    let path = hook_path(git_dir);
    if !path.exists() {
        return Ok(UninstallOutcome::NotFound);
    }

    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read hook: {}", path.display()))?;
    if !content.contains(HOOK_MARKER) {
        return Ok(UninstallOutcome::Foreign { path });
    }

    fs::remove_file(&path).with_context(|| format!("Failed to remove hook: {}", path.display()))?;
    Ok(UninstallOutcome::Removed { path })
}
