//! Log command: audits the most recent commits.

use anyhow::{Context, Result};
use clap::Parser;

use crate::audit::Auditor;
use crate::data::audit::AuditReport;
use crate::git::GitRepository;

/// Environment variable overriding the default number of commits.
pub const LOG_LIMIT_ENV: &str = "DIFFMATCH_LOG_LIMIT";

/// Commits audited when neither `--limit` nor the setting is given.
pub const DEFAULT_LOG_LIMIT: usize = 10;

/// Audits recent commits reachable from HEAD, newest first.
#[derive(Parser)]
pub struct LogCommand {
    /// Number of commits to audit (default: 10).
    #[arg(long)]
    pub limit: Option<usize>,

    /// Output format: text (default), json, yaml.
    #[arg(long)]
    pub format: Option<String>,

    /// Shows skipped merge commits as well.
    #[arg(short, long)]
    pub verbose: bool,
}

impl LogCommand {
    /// Executes the log command and returns the exit code.
    pub fn execute(self) -> Result<i32> {
        let format = super::resolve_format(self.format.as_deref())?;
        let limit = match self.limit {
            Some(limit) => limit,
            None => configured_limit()?,
        };

        crate::utils::check_git_repository()?;
        let repo = GitRepository::open().context("Failed to open git repository")?;
        let refs = repo
            .recent_commits(limit)
            .context("Could not read git log")?;

        let outcomes = Auditor::new(&repo).audit_many(&refs);
        let report = AuditReport::new(outcomes);

        super::print_report(&report, format, self.verbose)?;
        Ok(report.exit_code())
    }
}

/// Reads `DIFFMATCH_LOG_LIMIT`, falling back to [`DEFAULT_LOG_LIMIT`].
fn configured_limit() -> Result<usize> {
    match crate::utils::get_env_var(LOG_LIMIT_ENV) {
        Ok(value) => parse_limit(&value),
        Err(_) => Ok(DEFAULT_LOG_LIMIT),
    }
}

fn parse_limit(value: &str) -> Result<usize> {
    value
        .trim()
        .parse()
        .with_context(|| format!("Invalid {LOG_LIMIT_ENV} value: {value}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_limit_accepts_numbers() {
        assert_eq!(parse_limit("25").unwrap(), 25);
        assert_eq!(parse_limit(" 3\n").unwrap(), 3);
    }

    #[test]
    fn parse_limit_rejects_garbage() {
        let err = parse_limit("many").unwrap_err();
        assert!(err.to_string().contains(LOG_LIMIT_ENV));
    }
}
