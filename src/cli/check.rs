//! Check command: audits a single commit.

use anyhow::{Context, Result};
use clap::Parser;

use crate::audit::Auditor;
use crate::data::audit::{AuditOutcome, OutputFormat, Verdict};
use crate::git::GitRepository;

/// Audits one commit's message against its diff.
#[derive(Parser)]
pub struct CheckCommand {
    /// Commit to audit (hash, branch, `HEAD~2`, ...).
    #[arg(value_name = "REF", default_value = "HEAD")]
    pub reference: String,

    /// Output format: text (default), json, yaml.
    #[arg(long)]
    pub format: Option<String>,

    /// Shows skipped commits as well.
    #[arg(short, long)]
    pub verbose: bool,
}

impl CheckCommand {
    /// Executes the check command and returns the exit code.
    pub fn execute(self) -> Result<i32> {
        let format = super::resolve_format(self.format.as_deref())?;
        crate::utils::check_git_repository()?;
        let repo = GitRepository::open().context("Failed to open git repository")?;

        let outcome = Auditor::new(&repo).audit(&self.reference);

        if format == OutputFormat::Text {
            let color = super::use_color();
            println!();
            for line in super::formatting::format_outcome(&outcome, self.verbose, color) {
                println!("{line}");
            }
            println!();
        } else {
            super::print_structured(&outcome, format)?;
        }

        Ok(exit_code(&outcome))
    }
}

/// Maps a single outcome to the process exit code.
fn exit_code(outcome: &AuditOutcome) -> i32 {
    match outcome {
        AuditOutcome::Audited(result) if result.verdict == Verdict::Pass => 0,
        AuditOutcome::Audited(_) => 1,
        AuditOutcome::Skipped(_) => 0,
        AuditOutcome::Failed(_) => 2,
    }
}
