//! Terminal rendering for audit outcomes.
//!
//! Every function takes a `color` flag so output is plain when stdout is not
//! a terminal and so tests can assert on uncoloured text.

use crate::data::audit::{AuditOutcome, AuditResult, AuditSummary, Severity, Verdict};

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";

/// Maximum subject characters shown for audited commits.
const SUBJECT_WIDTH: usize = 65;

/// Maximum subject characters shown for skipped commits.
const SKIPPED_SUBJECT_WIDTH: usize = 60;

/// Indentation aligning detail lines under the subject.
const DETAIL_INDENT: &str = "         ";

/// Wraps `text` in ANSI codes when `color` is set.
fn paint(text: &str, codes: &[&str], color: bool) -> String {
    if color {
        format!("{}{text}{RESET}", codes.concat())
    } else {
        text.to_string()
    }
}

/// Truncates a commit hash to [`SHORT_HASH_LEN`](crate::git::SHORT_HASH_LEN) characters.
pub(crate) fn truncate_hash(hash: &str) -> &str {
    truncate_chars(hash, crate::git::SHORT_HASH_LEN)
}

/// Truncates to at most `max` characters without splitting a code point.
pub(crate) fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Returns the verdict label, coloured by severity.
pub(crate) fn format_verdict(verdict: Verdict, color: bool) -> String {
    let tint = match verdict {
        Verdict::Pass => GREEN,
        Verdict::Warn => YELLOW,
        Verdict::Fail => RED,
    };
    paint(&verdict.to_string(), &[tint, BOLD], color)
}

/// Formats `+A/-D in N file(s)`.
pub(crate) fn format_diff_line(added: usize, deleted: usize, files: usize) -> String {
    let noun = if files == 1 { "file" } else { "files" };
    format!("+{added}/-{deleted} in {files} {noun}")
}

fn format_audited(result: &AuditResult, color: bool) -> Vec<String> {
    let mut lines = vec![
        format!(
            "  {}  {}  {}",
            format_verdict(result.verdict, color),
            paint(truncate_hash(&result.reference), &[CYAN], color),
            truncate_chars(&result.subject, SUBJECT_WIDTH)
        ),
        format!(
            "{DETAIL_INDENT}{}",
            paint(
                &format_diff_line(result.diff.added, result.diff.deleted, result.diff.files),
                &[DIM],
                color
            )
        ),
    ];

    if result.diff.unavailable {
        lines.push(format!(
            "{DETAIL_INDENT}{}",
            paint("(diff could not be read)", &[DIM], color)
        ));
    }

    for finding in &result.findings {
        let icon = match finding.severity {
            Severity::Fail => paint("X", &[RED], color),
            Severity::Warn | Severity::Pass => paint("!", &[YELLOW], color),
        };
        lines.push(format!("{DETAIL_INDENT}{icon} {}", finding.message));
    }

    lines
}

/// Renders one outcome as display lines.
///
/// Skipped commits produce no lines unless `verbose` is set.
pub(crate) fn format_outcome(outcome: &AuditOutcome, verbose: bool, color: bool) -> Vec<String> {
    match outcome {
        AuditOutcome::Audited(result) => format_audited(result, color),
        AuditOutcome::Skipped(skipped) if verbose => {
            let subject = skipped.subject.as_deref().unwrap_or("?");
            vec![format!(
                "  {} {}  ({})",
                paint("SKIP", &[DIM], color),
                truncate_chars(subject, SKIPPED_SUBJECT_WIDTH),
                skipped.reason
            )]
        }
        AuditOutcome::Skipped(_) => Vec::new(),
        AuditOutcome::Failed(failed) => {
            let mut message = failed.error.clone();
            if let Some(cause) = &failed.cause {
                message.push_str(&format!(" ({cause})"));
            }
            vec![format!("  {}: {message}", paint("ERROR", &[RED], color))]
        }
    }
}

/// Formats the `log` summary line.
pub(crate) fn format_summary(summary: &AuditSummary, color: bool) -> String {
    let warned = summary.warned + summary.failed + summary.errored;
    format!(
        "  {} passed  {} warned  {} skipped",
        paint(&summary.passed.to_string(), &[GREEN], color),
        paint(&warned.to_string(), &[YELLOW], color),
        paint(&summary.skipped.to_string(), &[DIM], color)
    )
}

/// Formats the `log` header line.
pub(crate) fn format_log_header(count: usize, color: bool) -> String {
    format!(
        "  {} auditing last {count} commit(s)",
        paint("diffmatch", &[BOLD], color)
    )
}

/// Horizontal rule framing `log` output.
pub(crate) fn rule() -> String {
    format!("  {}", "\u{2500}".repeat(60))
}
