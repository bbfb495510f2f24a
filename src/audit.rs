//! Commit audit engine.
//!
//! [`Auditor`] pulls a commit's message, diff, and renames through a
//! [`CommitGateway`], runs the check battery, and returns an
//! [`AuditOutcome`]. Merge commits are skipped before any check runs.

pub mod categorize;
pub mod checks;
pub mod parser;
pub mod vocabulary;

use tracing::{debug, warn};

use crate::data::audit::{
    AuditOutcome, AuditResult, DiffSummary, FailedAudit, SkipReason, SkippedCommit, Verdict,
};
use crate::data::diff::{DiffStats, Rename};
use crate::git::gateway::CommitGateway;

use self::checks::CheckContext;

/// Audits commits read through a [`CommitGateway`].
#[derive(Debug)]
pub struct Auditor<G> {
    gateway: G,
}

impl<G: CommitGateway> Auditor<G> {
    /// Creates an auditor over the given gateway.
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    /// Audits a single reference.
    pub fn audit(&self, reference: &str) -> AuditOutcome {
        let raw = match self.gateway.commit_message(reference) {
            Ok(raw) if !raw.trim().is_empty() => raw,
            Ok(_) => {
                return AuditOutcome::Failed(FailedAudit {
                    reference: reference.to_string(),
                    error: "could not read commit message".to_string(),
                    cause: Some("commit message is empty".to_string()),
                });
            }
            Err(e) => {
                debug!(reference, error = %e, "Commit message unavailable");
                return AuditOutcome::Failed(FailedAudit {
                    reference: reference.to_string(),
                    error: "could not read commit message".to_string(),
                    cause: Some(e.to_string()),
                });
            }
        };

        let is_merge = self.gateway.is_merge_commit(reference).unwrap_or_else(|e| {
            debug!(reference, error = %e, "Parent count unavailable, assuming non-merge");
            false
        });
        if is_merge {
            debug!(reference, "Skipping merge commit");
            return AuditOutcome::Skipped(SkippedCommit {
                reference: reference.to_string(),
                subject: self.gateway.commit_subject(reference).ok(),
                reason: SkipReason::MergeCommit,
            });
        }

        let message = parser::parse(&raw);

        let mut unavailable = false;
        let diff = self.gateway.diff_stats(reference).unwrap_or_else(|e| {
            warn!(reference, error = %e, "Diff unavailable, auditing as empty diff");
            unavailable = true;
            DiffStats::default()
        });
        let renames: Vec<Rename> = self.gateway.renames(reference).unwrap_or_else(|e| {
            warn!(reference, error = %e, "Renames unavailable, assuming none");
            unavailable = true;
            Vec::new()
        });

        let ctx = CheckContext::new(&message, &diff, &renames);
        let findings = checks::run_all(&ctx);
        let verdict = Verdict::from_findings(&findings);

        let summary = DiffSummary {
            files: diff.file_count(),
            added: diff.total_added,
            deleted: diff.total_deleted,
            total: diff.total_changed(),
            renames: renames.len(),
            categories: ctx.categories.counts(),
            unavailable,
        };

        AuditOutcome::Audited(AuditResult {
            reference: reference.to_string(),
            subject: message.subject.clone(),
            commit_type: message.commit_type.clone(),
            scope: message.scope.clone(),
            is_conventional: message.is_conventional,
            diff: summary,
            findings,
            verdict,
        })
    }

    /// Audits several references, returning outcomes in input order.
    pub fn audit_many<S: AsRef<str>>(&self, references: &[S]) -> Vec<AuditOutcome> {
        references
            .iter()
            .map(|reference| self.audit(reference.as_ref()))
            .collect()
    }
}
