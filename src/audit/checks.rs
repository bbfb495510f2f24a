//! Heuristic checks comparing a commit message against its diff.
//!
//! Each check is a unit struct implementing [`Check`]. [`CHECKS`] fixes the
//! registration order, which is also the order findings are reported in.

use crate::audit::categorize::{categorize_paths, Categorized, FileCategory};
use crate::audit::parser::{extract_action_words, ActionWords};
use crate::audit::vocabulary::{ActionWord, ChangeDirection, CommitType};
use crate::data::audit::{CheckId, Finding};
use crate::data::diff::{DiffStats, Rename};
use crate::data::message::CommitMessage;

/// Total changed lines above which a terse message is flagged.
const LARGE_DIFF_LINES: usize = 200;

/// Descriptions with fewer words than this are considered terse.
const TERSE_DESCRIPTION_WORDS: usize = 4;

/// Ratio above which an action word's direction is contradicted.
const ACTION_DIRECTION_RATIO: f64 = 0.7;

/// Ratio above which a commit type's direction is contradicted.
const TYPE_DIRECTION_RATIO: f64 = 0.8;

/// Minimum line count on the contradicting side before a direction finding fires.
const MIN_DIRECTION_LINES: usize = 10;

/// Maximum number of paths or renames quoted in a finding.
const MAX_LISTED: usize = 3;

/// Words implying a small change, in reporting order.
const SMALL_CHANGE_WORDS: [ActionWord; 6] = [
    ActionWord::Typo,
    ActionWord::Minor,
    ActionWord::Small,
    ActionWord::Tiny,
    ActionWord::Whitespace,
    ActionWord::Comment,
];

/// Fallback threshold for a small-change word without one.
const DEFAULT_MAX_CHANGED: usize = 30;

/// Read-only inputs shared by every check.
#[derive(Debug)]
pub struct CheckContext<'a> {
    /// Parsed commit message.
    pub message: &'a CommitMessage,
    /// Diff statistics.
    pub diff: &'a DiffStats,
    /// Detected renames.
    pub renames: &'a [Rename],
    /// Action words found in the description.
    pub actions: ActionWords,
    /// Changed paths by category.
    pub categories: Categorized,
}

impl<'a> CheckContext<'a> {
    /// Builds a context, extracting action words and categorizing paths once.
    pub fn new(message: &'a CommitMessage, diff: &'a DiffStats, renames: &'a [Rename]) -> Self {
        Self {
            actions: extract_action_words(&message.description),
            categories: categorize_paths(diff.paths()),
            message,
            diff,
            renames,
        }
    }
}

/// A single heuristic rule.
pub trait Check: Sync {
    /// Identifier attached to every finding this check produces.
    fn id(&self) -> CheckId;

    /// Evaluates the rule. Must not depend on any other check's output.
    fn evaluate(&self, ctx: &CheckContext<'_>) -> Vec<Finding>;
}

/// Registered checks in reporting order.
pub static CHECKS: &[&dyn Check] = &[
    &SizeMismatch,
    &DirectionMismatch,
    &ScopeMismatch,
    &RenameMismatch,
    &EmptyDiff,
];

/// Runs every registered check and concatenates the findings.
pub fn run_all(ctx: &CheckContext<'_>) -> Vec<Finding> {
    CHECKS.iter().flat_map(|check| check.evaluate(ctx)).collect()
}

/// Joins up to [`MAX_LISTED`] items and appends `...` when more exist.
fn list_with_elision<T: ToString>(items: &[T], separator: &str) -> String {
    let shown: Vec<String> = items.iter().take(MAX_LISTED).map(ToString::to_string).collect();
    let elision = if items.len() > MAX_LISTED { "..." } else { "" };
    format!("{}{elision}", shown.join(separator))
}

fn percent(ratio: f64) -> String {
    format!("{:.0}%", ratio * 100.0)
}

/// Message implies a small change but the diff is large, or a large diff
/// comes with a terse message.
#[derive(Debug, Clone, Copy)]
pub struct SizeMismatch;

impl Check for SizeMismatch {
    fn id(&self) -> CheckId {
        CheckId::SizeMismatch
    }

    fn evaluate(&self, ctx: &CheckContext<'_>) -> Vec<Finding> {
        let mut findings = Vec::new();
        let total_changed = ctx.diff.total_changed();
        let num_files = ctx.diff.file_count();

        for word in SMALL_CHANGE_WORDS {
            let Some(expectation) = ctx.actions.get(word) else {
                continue;
            };
            let max_changed = expectation.max_changed.unwrap_or(DEFAULT_MAX_CHANGED);
            if total_changed > max_changed {
                findings.push(Finding::warn(
                    self.id(),
                    format!(
                        "Message says \"{word}\" but diff is {total_changed} lines across \
                         {num_files} file(s). Expected <{max_changed} lines."
                    ),
                ));
            }
        }

        if total_changed > LARGE_DIFF_LINES
            && ctx.message.description_word_count() < TERSE_DESCRIPTION_WORDS
        {
            findings.push(Finding::warn(
                self.id(),
                format!(
                    "Large diff ({total_changed} lines, {num_files} files) with very short \
                     commit message: \"{}\"",
                    ctx.message.subject
                ),
            ));
        }

        findings
    }
}

/// Message says "add" but the diff mostly deletes, or the reverse.
#[derive(Debug, Clone, Copy)]
pub struct DirectionMismatch;

impl Check for DirectionMismatch {
    fn id(&self) -> CheckId {
        CheckId::DirectionMismatch
    }

    fn evaluate(&self, ctx: &CheckContext<'_>) -> Vec<Finding> {
        let mut findings = Vec::new();
        let added = ctx.diff.total_added;
        let deleted = ctx.diff.total_deleted;
        let total = added + deleted;

        if total == 0 {
            return findings;
        }

        let add_ratio = added as f64 / total as f64;
        let del_ratio = deleted as f64 / total as f64;

        for (word, expectation) in ctx.actions.iter() {
            match expectation.direction {
                Some(ChangeDirection::Additions)
                    if del_ratio > ACTION_DIRECTION_RATIO && deleted > MIN_DIRECTION_LINES =>
                {
                    findings.push(Finding::warn(
                        self.id(),
                        format!(
                            "Message says \"{word}\" but diff is {} deletions (+{added}/-{deleted}). \
                             More was removed than added.",
                            percent(del_ratio)
                        ),
                    ));
                }
                Some(ChangeDirection::Deletions)
                    if add_ratio > ACTION_DIRECTION_RATIO && added > MIN_DIRECTION_LINES =>
                {
                    findings.push(Finding::warn(
                        self.id(),
                        format!(
                            "Message says \"{word}\" but diff is {} additions (+{added}/-{deleted}). \
                             More was added than removed.",
                            percent(add_ratio)
                        ),
                    ));
                }
                _ => {}
            }
        }

        let Some(commit_type) = ctx.message.known_type() else {
            return findings;
        };
        if total <= MIN_DIRECTION_LINES {
            return findings;
        }

        match commit_type.expected_direction() {
            Some(ChangeDirection::Additions) if del_ratio > TYPE_DIRECTION_RATIO => {
                findings.push(Finding::warn(
                    self.id(),
                    format!(
                        "Commit type is \"{commit_type}\" but diff is {} deletions \
                         (+{added}/-{deleted}). Features usually add code.",
                        percent(del_ratio)
                    ),
                ));
            }
            Some(ChangeDirection::Deletions) if add_ratio > TYPE_DIRECTION_RATIO => {
                findings.push(Finding::warn(
                    self.id(),
                    format!(
                        "Commit type is \"{commit_type}\" but diff is {} additions \
                         (+{added}/-{deleted}). Reverts usually remove code.",
                        percent(add_ratio)
                    ),
                ));
            }
            _ => {}
        }

        findings
    }
}

/// Scope or type claims a narrower area than the files actually touched.
#[derive(Debug, Clone, Copy)]
pub struct ScopeMismatch;

impl Check for ScopeMismatch {
    fn id(&self) -> CheckId {
        CheckId::ScopeMismatch
    }

    fn evaluate(&self, ctx: &CheckContext<'_>) -> Vec<Finding> {
        let mut findings = Vec::new();
        let num_files = ctx.diff.file_count();

        if let Some(scope) = ctx.message.scope.as_deref() {
            let scope_lower = scope.to_lowercase();
            let scope_in_paths = ctx
                .diff
                .paths()
                .any(|path| path.to_lowercase().contains(&scope_lower));
            if !scope_in_paths && num_files > 0 {
                findings.push(Finding::warn(
                    self.id(),
                    format!(
                        "Commit scope is \"{scope}\" but none of the {num_files} changed file(s) \
                         contain \"{scope_lower}\" in their path."
                    ),
                ));
            }
        }

        if ctx.message.has_type(CommitType::Docs) {
            let non_doc = ctx.categories.paths_outside(FileCategory::Docs);
            if !non_doc.is_empty() {
                findings.push(Finding::warn(
                    self.id(),
                    format!(
                        "Commit type is \"docs\" but changed files include non-documentation: {}",
                        list_with_elision(&non_doc, ", ")
                    ),
                ));
            }
        }

        if ctx.message.has_type(CommitType::Test) && !ctx.categories.contains(FileCategory::Test) {
            let non_test = ctx.categories.paths_outside(FileCategory::Test);
            if !non_test.is_empty() {
                findings.push(Finding::warn(
                    self.id(),
                    format!(
                        "Commit type is \"test\" but no test files were changed. Changed: {}",
                        list_with_elision(&non_test, ", ")
                    ),
                ));
            }
        }

        if ctx.message.description.to_lowercase().contains("readme") && num_files > 3 {
            let all_readme = ctx
                .diff
                .paths()
                .all(|path| path.to_lowercase().contains("readme"));
            if !all_readme {
                findings.push(Finding::warn(
                    self.id(),
                    format!(
                        "Message mentions README but {num_files} files were changed, not just README."
                    ),
                ));
            }
        }

        findings
    }
}

/// Message says rename/move but nothing was renamed, or renames went unmentioned.
#[derive(Debug, Clone, Copy)]
pub struct RenameMismatch;

impl Check for RenameMismatch {
    fn id(&self) -> CheckId {
        CheckId::RenameMismatch
    }

    fn evaluate(&self, ctx: &CheckContext<'_>) -> Vec<Finding> {
        let mut findings = Vec::new();
        let mentions_rename = ctx
            .actions
            .iter()
            .any(|(_, expectation)| expectation.expects_renames);

        if mentions_rename && ctx.renames.is_empty() {
            findings.push(Finding::warn(
                self.id(),
                "Message implies renaming/moving but git detected no renames in this diff.",
            ));
        }

        if !ctx.renames.is_empty() && !mentions_rename {
            findings.push(Finding::warn(
                self.id(),
                format!(
                    "Diff contains {} rename(s) not mentioned in commit message: {}",
                    ctx.renames.len(),
                    list_with_elision(ctx.renames, "; ")
                ),
            ));
        }

        findings
    }
}

/// The commit changes no files.
#[derive(Debug, Clone, Copy)]
pub struct EmptyDiff;

impl Check for EmptyDiff {
    fn id(&self) -> CheckId {
        CheckId::EmptyDiff
    }

    fn evaluate(&self, ctx: &CheckContext<'_>) -> Vec<Finding> {
        if ctx.diff.is_empty() {
            vec![Finding::warn(
                self.id(),
                "Commit has no file changes (empty diff).",
            )]
        } else {
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::parser::parse;
    use crate::data::audit::Severity;
    use crate::data::diff::FileChange;

    fn stats(files: &[(&str, usize, usize)]) -> DiffStats {
        DiffStats::from_files(
            files
                .iter()
                .map(|(path, added, deleted)| FileChange::new(*path, *added, *deleted))
                .collect(),
        )
    }

    fn run(check: &dyn Check, message: &str, diff: &DiffStats, renames: &[Rename]) -> Vec<Finding> {
        let parsed = parse(message);
        let ctx = CheckContext::new(&parsed, diff, renames);
        check.evaluate(&ctx)
    }

    // ── registry ───────────────────────────────────────────────────

    #[test]
    fn registry_order() {
        let ids: Vec<CheckId> = CHECKS.iter().map(|c| c.id()).collect();
        assert_eq!(
            ids,
            vec![
                CheckId::SizeMismatch,
                CheckId::DirectionMismatch,
                CheckId::ScopeMismatch,
                CheckId::RenameMismatch,
                CheckId::EmptyDiff,
            ]
        );
    }

    #[test]
    fn findings_carry_their_check_id() {
        let diff = stats(&[("src/a.rs", 10, 12)]);
        let findings = run(&SizeMismatch, "fix: typo in header", &diff, &[]);
        assert!(findings.iter().all(|f| f.check == CheckId::SizeMismatch));
        assert!(findings.iter().all(|f| f.severity == Severity::Warn));
    }

    // ── size mismatch ──────────────────────────────────────────────

    #[test]
    fn typo_over_threshold() {
        let diff = stats(&[("src/header.rs", 10, 12)]);
        let findings = run(&SizeMismatch, "fix: typo in header", &diff, &[]);
        assert_eq!(findings.len(), 1);
        assert_eq!(
            findings[0].message,
            "Message says \"typo\" but diff is 22 lines across 1 file(s). Expected <20 lines."
        );
    }

    #[test]
    fn typo_at_threshold_passes() {
        let diff = stats(&[("src/header.rs", 10, 10)]);
        assert!(run(&SizeMismatch, "fix: typo in header", &diff, &[]).is_empty());
    }

    #[test]
    fn several_small_words_each_fire() {
        let diff = stats(&[("a.rs", 40, 0)]);
        let findings = run(&SizeMismatch, "tiny typo fix", &diff, &[]);
        assert_eq!(findings.len(), 2);
        assert!(findings[0].message.contains("\"typo\""));
        assert!(findings[1].message.contains("\"tiny\""));
    }

    #[test]
    fn large_diff_terse_message() {
        let diff = stats(&[("a.rs", 150, 60), ("b.rs", 1, 0)]);
        let findings = run(&SizeMismatch, "wip", &diff, &[]);
        assert_eq!(findings.len(), 1);
        assert_eq!(
            findings[0].message,
            "Large diff (211 lines, 2 files) with very short commit message: \"wip\""
        );
    }

    #[test]
    fn small_word_and_terse_rule_co_fire() {
        let diff = stats(&[("a.rs", 300, 0)]);
        let findings = run(&SizeMismatch, "minor cleanup", &diff, &[]);
        assert_eq!(findings.len(), 2);
    }

    #[test]
    fn large_diff_with_descriptive_message_passes() {
        let diff = stats(&[("a.rs", 300, 0)]);
        let message = "feat: implement streaming exporter for metrics";
        assert!(run(&SizeMismatch, message, &diff, &[]).is_empty());
    }

    // ── direction mismatch ─────────────────────────────────────────

    #[test]
    fn feat_mostly_deletions() {
        let diff = stats(&[("src/export.rs", 3, 40)]);
        let findings = run(&DirectionMismatch, "feat: add new exporter", &diff, &[]);
        assert_eq!(findings.len(), 2);
        assert_eq!(
            findings[0].message,
            "Message says \"add\" but diff is 93% deletions (+3/-40). More was removed than added."
        );
        assert_eq!(
            findings[1].message,
            "Commit type is \"feat\" but diff is 93% deletions (+3/-40). Features usually add code."
        );
    }

    #[test]
    fn remove_mostly_additions() {
        let diff = stats(&[("src/a.rs", 50, 5)]);
        let findings = run(&DirectionMismatch, "remove legacy flag", &diff, &[]);
        assert_eq!(findings.len(), 1);
        assert!(findings[0].message.contains("\"remove\""));
        assert!(findings[0].message.contains("additions (+50/-5)"));
    }

    #[test]
    fn create_mostly_deletions() {
        let diff = stats(&[("tests/fixtures.rs", 1, 30)]);
        let findings = run(&DirectionMismatch, "create fixtures", &diff, &[]);
        assert_eq!(findings.len(), 1);
        assert_eq!(
            findings[0].message,
            "Message says \"create\" but diff is 97% deletions (+1/-30). More was removed than added."
        );
    }

    #[test]
    fn delete_mostly_additions() {
        let diff = stats(&[("src/cache.rs", 40, 1)]);
        let findings = run(&DirectionMismatch, "delete stale cache", &diff, &[]);
        assert_eq!(findings.len(), 1);
        assert_eq!(
            findings[0].message,
            "Message says \"delete\" but diff is 98% additions (+40/-1). More was added than removed."
        );
    }

    #[test]
    fn revert_mostly_additions() {
        let diff = stats(&[("src/a.rs", 90, 2)]);
        let findings = run(&DirectionMismatch, "revert: undo cache change", &diff, &[]);
        assert_eq!(findings.len(), 1);
        assert!(findings[0].message.starts_with("Commit type is \"revert\""));
    }

    #[test]
    fn direction_requires_enough_lines() {
        let diff = stats(&[("src/a.rs", 0, 9)]);
        assert!(run(&DirectionMismatch, "feat: add thing", &diff, &[]).is_empty());
    }

    #[test]
    fn direction_skips_empty_totals() {
        let diff = DiffStats::from_files(vec![FileChange::binary("logo.png")]);
        assert!(run(&DirectionMismatch, "feat: add logo", &diff, &[]).is_empty());
    }

    #[test]
    fn balanced_diff_passes() {
        let diff = stats(&[("src/a.rs", 30, 30)]);
        assert!(run(&DirectionMismatch, "add and remove things", &diff, &[]).is_empty());
    }

    // ── scope mismatch ─────────────────────────────────────────────

    #[test]
    fn scope_not_in_any_path() {
        let diff = stats(&[("src/db/query.go", 4, 2)]);
        let findings = run(&ScopeMismatch, "fix(auth): patch token check", &diff, &[]);
        assert_eq!(findings.len(), 1);
        assert_eq!(
            findings[0].message,
            "Commit scope is \"auth\" but none of the 1 changed file(s) contain \"auth\" in their path."
        );
    }

    #[test]
    fn scope_matches_case_insensitively() {
        let diff = stats(&[("src/Auth/token.go", 4, 2)]);
        assert!(run(&ScopeMismatch, "fix(AUTH): patch token check", &diff, &[]).is_empty());
    }

    #[test]
    fn scope_ignored_without_files() {
        let diff = DiffStats::default();
        assert!(run(&ScopeMismatch, "fix(auth): patch", &diff, &[]).is_empty());
    }

    #[test]
    fn docs_type_with_code_files() {
        let diff = stats(&[
            ("README.md", 2, 1),
            ("src/a.rs", 1, 1),
            ("src/b.rs", 1, 1),
            ("src/c.rs", 1, 1),
            ("src/d.rs", 1, 1),
        ]);
        let findings = run(&ScopeMismatch, "docs: explain setup", &diff, &[]);
        assert_eq!(findings.len(), 1);
        assert_eq!(
            findings[0].message,
            "Commit type is \"docs\" but changed files include non-documentation: \
             src/a.rs, src/b.rs, src/c.rs..."
        );
    }

    #[test]
    fn docs_type_only_docs_passes() {
        let diff = stats(&[("README.md", 2, 1), ("docs/setup.md", 5, 0)]);
        assert!(run(&ScopeMismatch, "docs: explain setup", &diff, &[]).is_empty());
    }

    #[test]
    fn test_type_without_test_files() {
        let diff = stats(&[("src/a.rs", 1, 1), ("src/b.rs", 1, 1)]);
        let findings = run(&ScopeMismatch, "test: cover parser", &diff, &[]);
        assert_eq!(findings.len(), 1);
        assert_eq!(
            findings[0].message,
            "Commit type is \"test\" but no test files were changed. Changed: src/a.rs, src/b.rs"
        );
    }

    #[test]
    fn test_type_with_any_test_file_passes() {
        let diff = stats(&[("src/a.rs", 1, 1), ("tests/parser.rs", 10, 0)]);
        assert!(run(&ScopeMismatch, "test: cover parser", &diff, &[]).is_empty());
    }

    #[test]
    fn readme_message_with_many_files() {
        let diff = stats(&[
            ("README.md", 1, 1),
            ("a.rs", 1, 1),
            ("b.rs", 1, 1),
            ("c.rs", 1, 1),
        ]);
        let findings = run(&ScopeMismatch, "Update README", &diff, &[]);
        assert_eq!(findings.len(), 1);
        assert_eq!(
            findings[0].message,
            "Message mentions README but 4 files were changed, not just README."
        );
    }

    #[test]
    fn readme_message_with_three_files_passes() {
        let diff = stats(&[("README.md", 1, 1), ("a.rs", 1, 1), ("b.rs", 1, 1)]);
        assert!(run(&ScopeMismatch, "Update README", &diff, &[]).is_empty());
    }

    // ── rename mismatch ────────────────────────────────────────────

    #[test]
    fn unmentioned_rename() {
        let diff = stats(&[("new/a.go", 0, 0)]);
        let renames = vec![Rename::new("old/a.go", "new/a.go")];
        let findings = run(&RenameMismatch, "update internal helpers", &diff, &renames);
        assert_eq!(findings.len(), 1);
        assert_eq!(
            findings[0].message,
            "Diff contains 1 rename(s) not mentioned in commit message: old/a.go \u{2192} new/a.go"
        );
    }

    #[test]
    fn rename_elision_only_beyond_three() {
        let diff = stats(&[("x", 0, 0)]);
        let three: Vec<Rename> = (0..3).map(|i| Rename::new(format!("a{i}"), format!("b{i}"))).collect();
        let findings = run(&RenameMismatch, "update", &diff, &three);
        assert!(!findings[0].message.ends_with("..."));

        let four: Vec<Rename> = (0..4).map(|i| Rename::new(format!("a{i}"), format!("b{i}"))).collect();
        let findings = run(&RenameMismatch, "update", &diff, &four);
        assert!(findings[0].message.contains("Diff contains 4 rename(s)"));
        assert!(findings[0].message.ends_with("a2 \u{2192} b2..."));
    }

    #[test]
    fn claimed_rename_not_detected() {
        let diff = stats(&[("src/a.rs", 3, 3)]);
        let findings = run(&RenameMismatch, "refactor: move helpers", &diff, &[]);
        assert_eq!(findings.len(), 1);
        assert!(findings[0].message.contains("no renames"));
    }

    #[test]
    fn mentioned_rename_passes() {
        let diff = stats(&[("new/a.go", 0, 0)]);
        let renames = vec![Rename::new("old/a.go", "new/a.go")];
        assert!(run(&RenameMismatch, "Rename a.go", &diff, &renames).is_empty());
    }

    // ── empty diff ─────────────────────────────────────────────────

    #[test]
    fn empty_diff_fires_alone() {
        let diff = DiffStats::default();
        let parsed = parse("fix(auth): tiny typo; add and remove things in README");
        let ctx = CheckContext::new(&parsed, &diff, &[]);
        let findings = run_all(&ctx);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].check, CheckId::EmptyDiff);
    }

    #[test]
    fn run_all_concatenates_in_registration_order() {
        let diff = stats(&[("src/db/query.go", 3, 40)]);
        let parsed = parse("feat(auth): add");
        let renames = vec![Rename::new("a", "b")];
        let ctx = CheckContext::new(&parsed, &diff, &renames);
        let checks: Vec<CheckId> = run_all(&ctx).iter().map(|f| f.check).collect();
        assert_eq!(
            checks,
            vec![
                CheckId::DirectionMismatch,
                CheckId::DirectionMismatch,
                CheckId::ScopeMismatch,
                CheckId::RenameMismatch,
            ]
        );
    }
}
