//! Audit result types for commit-diff consistency checks.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::audit::categorize::FileCategory;

/// Severity level of a single finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Nothing to report.
    Pass,
    /// Likely mismatch between message and diff.
    Warn,
    /// Definite mismatch. Reserved; no built-in check produces it yet.
    Fail,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pass => write!(f, "pass"),
            Self::Warn => write!(f, "warn"),
            Self::Fail => write!(f, "fail"),
        }
    }
}

/// Identifies the check that produced a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckId {
    /// Message wording implies a small change but the diff is large (or the reverse).
    SizeMismatch,
    /// Message implies additions but the diff mostly deletes (or the reverse).
    DirectionMismatch,
    /// Scope or type claims a narrower area than the files touched.
    ScopeMismatch,
    /// Renames claimed but not detected, or detected but not mentioned.
    RenameMismatch,
    /// The commit changes no files.
    EmptyDiff,
}

impl CheckId {
    /// Returns the stable snake_case name of the check.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SizeMismatch => "size_mismatch",
            Self::DirectionMismatch => "direction_mismatch",
            Self::ScopeMismatch => "scope_mismatch",
            Self::RenameMismatch => "rename_mismatch",
            Self::EmptyDiff => "empty_diff",
        }
    }
}

impl fmt::Display for CheckId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single mismatch between stated intent and actual diff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// Severity level of the finding.
    pub severity: Severity,
    /// Check that produced the finding.
    pub check: CheckId,
    /// Explanation embedding the numbers or words that triggered it.
    pub message: String,
}

impl Finding {
    /// Creates a warning-level finding.
    pub fn warn(check: CheckId, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warn,
            check,
            message: message.into(),
        }
    }
}

/// Overall result of one audited commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    /// No findings.
    Pass,
    /// At least one finding, none failing.
    Warn,
    /// At least one failing finding.
    Fail,
}

impl Verdict {
    /// Derives the verdict from a finding sequence.
    pub fn from_findings(findings: &[Finding]) -> Self {
        if findings.iter().any(|f| f.severity == Severity::Fail) {
            Self::Fail
        } else if !findings.is_empty() {
            Self::Warn
        } else {
            Self::Pass
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pass => write!(f, "PASS"),
            Self::Warn => write!(f, "WARN"),
            Self::Fail => write!(f, "FAIL"),
        }
    }
}

/// Summary of the diff an audit was run against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffSummary {
    /// Number of changed files.
    pub files: usize,
    /// Total inserted lines.
    pub added: usize,
    /// Total removed lines.
    pub deleted: usize,
    /// Added plus deleted.
    pub total: usize,
    /// Number of detected renames.
    pub renames: usize,
    /// Changed-file count per category (only non-empty categories).
    pub categories: BTreeMap<FileCategory, usize>,
    /// Set when diff or rename retrieval failed and empty data was substituted.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub unavailable: bool,
}

/// Complete audit of a single non-merge commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditResult {
    /// Reference the audit was requested for.
    #[serde(rename = "ref")]
    pub reference: String,
    /// Subject line of the commit message.
    pub subject: String,
    /// Conventional-commit type, if any.
    #[serde(rename = "type")]
    pub commit_type: Option<String>,
    /// Conventional-commit scope, if any.
    pub scope: Option<String>,
    /// Whether the subject follows the conventional-commit format.
    pub is_conventional: bool,
    /// Diff summary.
    pub diff: DiffSummary,
    /// Findings in check-registration order.
    pub findings: Vec<Finding>,
    /// Verdict derived from `findings`.
    pub verdict: Verdict,
}

/// Why a commit was not audited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Commits with more than one parent are never audited.
    MergeCommit,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MergeCommit => write!(f, "merge commit"),
        }
    }
}

/// A commit that was deliberately not audited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedCommit {
    /// Reference the audit was requested for.
    #[serde(rename = "ref")]
    pub reference: String,
    /// Subject line, when it could be read.
    pub subject: Option<String>,
    /// Reason for skipping.
    pub reason: SkipReason,
}

/// An audit that could not run because the commit could not be read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedAudit {
    /// Reference the audit was requested for.
    #[serde(rename = "ref")]
    pub reference: String,
    /// Human-readable error.
    pub error: String,
    /// Underlying gateway error, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cause: Option<String>,
}

/// Outcome of auditing one reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AuditOutcome {
    /// The commit was audited.
    Audited(AuditResult),
    /// The commit was skipped (merge commit).
    Skipped(SkippedCommit),
    /// The commit could not be read.
    Failed(FailedAudit),
}

impl AuditOutcome {
    /// Returns the reference this outcome belongs to.
    pub fn reference(&self) -> &str {
        match self {
            Self::Audited(r) => &r.reference,
            Self::Skipped(s) => &s.reference,
            Self::Failed(e) => &e.reference,
        }
    }

    /// Returns the verdict when the commit was audited.
    pub fn verdict(&self) -> Option<Verdict> {
        match self {
            Self::Audited(r) => Some(r.verdict),
            Self::Skipped(_) | Self::Failed(_) => None,
        }
    }
}

/// Aggregated outcomes of auditing several references.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditReport {
    /// Outcomes in caller-supplied reference order.
    pub outcomes: Vec<AuditOutcome>,
    /// Summary statistics.
    pub summary: AuditSummary,
}

/// Summary statistics for an audit report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditSummary {
    /// Number of references audited.
    pub total: usize,
    /// Audited commits with a pass verdict.
    pub passed: usize,
    /// Audited commits with a warn verdict.
    pub warned: usize,
    /// Audited commits with a fail verdict.
    pub failed: usize,
    /// Skipped commits.
    pub skipped: usize,
    /// Commits that could not be read.
    pub errored: usize,
}

impl AuditSummary {
    /// Creates a summary from a list of outcomes.
    pub fn from_outcomes(outcomes: &[AuditOutcome]) -> Self {
        let mut summary = Self {
            total: outcomes.len(),
            ..Self::default()
        };

        for outcome in outcomes {
            match outcome {
                AuditOutcome::Audited(result) => match result.verdict {
                    Verdict::Pass => summary.passed += 1,
                    Verdict::Warn => summary.warned += 1,
                    Verdict::Fail => summary.failed += 1,
                },
                AuditOutcome::Skipped(_) => summary.skipped += 1,
                AuditOutcome::Failed(_) => summary.errored += 1,
            }
        }

        summary
    }
}

impl AuditReport {
    /// Creates a new report from audit outcomes.
    pub fn new(outcomes: Vec<AuditOutcome>) -> Self {
        let summary = AuditSummary::from_outcomes(&outcomes);
        Self { outcomes, summary }
    }

    /// Checks if any audited commit has findings or any audit failed.
    #[must_use]
    pub fn has_problems(&self) -> bool {
        self.summary.warned + self.summary.failed + self.summary.errored > 0
    }

    /// Determines the process exit code for this report.
    ///
    /// `2` when every reference failed to be read, `1` when anything warned,
    /// failed, or errored, `0` otherwise.
    pub fn exit_code(&self) -> i32 {
        if self.summary.errored > 0 && self.summary.errored == self.summary.total {
            2
        } else if self.has_problems() {
            1
        } else {
            0
        }
    }
}

/// Output format for audit results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text format.
    #[default]
    Text,
    /// JSON format.
    Json,
    /// YAML format.
    Yaml,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "yaml" => Ok(Self::Yaml),
            other => Err(format!("Invalid format: {other}. Use: text, json, yaml")),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
            Self::Yaml => write!(f, "yaml"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn audited(reference: &str, findings: Vec<Finding>) -> AuditOutcome {
        let verdict = Verdict::from_findings(&findings);
        AuditOutcome::Audited(AuditResult {
            reference: reference.to_string(),
            subject: "subject".to_string(),
            commit_type: None,
            scope: None,
            is_conventional: false,
            diff: DiffSummary {
                files: 0,
                added: 0,
                deleted: 0,
                total: 0,
                renames: 0,
                categories: BTreeMap::new(),
                unavailable: false,
            },
            findings,
            verdict,
        })
    }

    fn failed(reference: &str) -> AuditOutcome {
        AuditOutcome::Failed(FailedAudit {
            reference: reference.to_string(),
            error: "could not read commit message".to_string(),
            cause: None,
        })
    }

    #[test]
    fn verdict_pass_without_findings() {
        assert_eq!(Verdict::from_findings(&[]), Verdict::Pass);
    }

    #[test]
    fn verdict_warn_with_warnings() {
        let findings = vec![Finding::warn(CheckId::EmptyDiff, "empty")];
        assert_eq!(Verdict::from_findings(&findings), Verdict::Warn);
    }

    #[test]
    fn verdict_fail_dominates() {
        let findings = vec![
            Finding::warn(CheckId::SizeMismatch, "big"),
            Finding {
                severity: Severity::Fail,
                check: CheckId::ScopeMismatch,
                message: "wrong scope".to_string(),
            },
        ];
        assert_eq!(Verdict::from_findings(&findings), Verdict::Fail);
    }

    #[test]
    fn summary_counts_each_outcome() {
        let outcomes = vec![
            audited("a", vec![]),
            audited("b", vec![Finding::warn(CheckId::EmptyDiff, "empty")]),
            AuditOutcome::Skipped(SkippedCommit {
                reference: "c".to_string(),
                subject: Some("Merge branch 'x'".to_string()),
                reason: SkipReason::MergeCommit,
            }),
            failed("d"),
        ];
        let summary = AuditSummary::from_outcomes(&outcomes);
        assert_eq!(summary.total, 4);
        assert_eq!(summary.passed, 1);
        assert_eq!(summary.warned, 1);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.errored, 1);
    }

    #[test]
    fn exit_code_zero_when_all_pass_or_skipped() {
        let report = AuditReport::new(vec![audited("a", vec![])]);
        assert_eq!(report.exit_code(), 0);
        assert_eq!(AuditReport::new(vec![]).exit_code(), 0);
    }

    #[test]
    fn exit_code_one_on_warnings() {
        let report = AuditReport::new(vec![
            audited("a", vec![]),
            audited("b", vec![Finding::warn(CheckId::EmptyDiff, "empty")]),
        ]);
        assert_eq!(report.exit_code(), 1);
    }

    #[test]
    fn exit_code_one_on_partial_failure() {
        let report = AuditReport::new(vec![audited("a", vec![]), failed("b")]);
        assert_eq!(report.exit_code(), 1);
    }

    #[test]
    fn exit_code_two_when_everything_failed() {
        let report = AuditReport::new(vec![failed("a")]);
        assert_eq!(report.exit_code(), 2);
    }

    #[test]
    fn outcome_reference_and_verdict() {
        let outcome = audited("abc123", vec![]);
        assert_eq!(outcome.reference(), "abc123");
        assert_eq!(outcome.verdict(), Some(Verdict::Pass));
        assert_eq!(failed("zzz").verdict(), None);
    }

    #[test]
    fn output_format_parse() {
        assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!("yaml".parse::<OutputFormat>(), Ok(OutputFormat::Yaml));
        assert!("xml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn check_id_serializes_snake_case() {
        let json = serde_json::to_string(&CheckId::DirectionMismatch).unwrap();
        assert_eq!(json, "\"direction_mismatch\"");
        assert_eq!(CheckId::RenameMismatch.to_string(), "rename_mismatch");
    }

    #[test]
    fn unavailable_flag_omitted_when_false() {
        let outcome = audited("a", vec![]);
        let json = serde_json::to_string(&outcome).unwrap();
        assert!(json.contains("\"outcome\":\"audited\""));
        assert!(!json.contains("unavailable"));
    }
}
