//! Hook command: manages the commit-msg hook.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::git::hook::{self, HookMode, InstallOutcome, UninstallOutcome};
use crate::git::GitRepository;

/// Commit-msg hook management.
#[derive(Parser)]
pub struct HookCommand {
    /// Hook subcommand to execute.
    #[command(subcommand)]
    pub command: HookSubcommands,
}

/// Hook subcommands.
#[derive(Subcommand)]
pub enum HookSubcommands {
    /// Installs the commit-msg hook.
    Install(InstallCommand),
    /// Removes the commit-msg hook if diffmatch installed it.
    Uninstall(UninstallCommand),
}

/// Installs the commit-msg hook.
#[derive(Parser)]
pub struct InstallCommand {
    /// Blocks commits whose audit warns or fails.
    #[arg(long)]
    pub strict: bool,

    /// Overwrites an existing hook from another tool.
    #[arg(long)]
    pub force: bool,
}

/// Removes the commit-msg hook.
#[derive(Parser)]
pub struct UninstallCommand {}

impl HookCommand {
    /// Executes the hook subcommand and returns the exit code.
    pub fn execute(self) -> Result<i32> {
        crate::utils::check_git_repository()?;
        let repo = GitRepository::open().context("Failed to open git repository")?;

        match self.command {
            HookSubcommands::Install(cmd) => cmd.execute(&repo),
            HookSubcommands::Uninstall(cmd) => cmd.execute(&repo),
        }
    }
}

impl InstallCommand {
    fn execute(self, repo: &GitRepository) -> Result<i32> {
        let executable =
            std::env::current_exe().context("Failed to locate the diffmatch executable")?;
        let mode = if self.strict {
            HookMode::Strict
        } else {
            HookMode::Advisory
        };

        match hook::install_hook(repo.git_dir(), &executable, mode, self.force)? {
            InstallOutcome::Installed { path, mode } => {
                println!("  Installed diffmatch hook at {}", path.display());
                println!("  Mode: {mode}");
                Ok(0)
            }
            InstallOutcome::AlreadyInstalled { .. } => {
                println!("  diffmatch hook already installed.");
                Ok(0)
            }
            InstallOutcome::ForeignHookExists { path } => {
                eprintln!("  Warning: existing commit-msg hook at {}", path.display());
                eprintln!("  Use --force to overwrite, or integrate manually.");
                Ok(1)
            }
        }
    }
}

impl UninstallCommand {
    fn execute(self, repo: &GitRepository) -> Result<i32> {
        match hook::uninstall_hook(repo.git_dir())? {
            UninstallOutcome::Removed { path } => {
                println!("  Removed diffmatch hook from {}", path.display());
            }
            UninstallOutcome::NotFound => println!("  No commit-msg hook found."),
            UninstallOutcome::Foreign { .. } => {
                println!("  Existing commit-msg hook is not from diffmatch. Leaving it alone.");
            }
        }
        Ok(0)
    }
}
