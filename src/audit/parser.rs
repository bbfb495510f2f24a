//! Commit message parsing and action-word extraction.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::audit::vocabulary::{ActionExpectation, ActionWord};
use crate::data::message::CommitMessage;

// Conventional commit: type(scope)!: description
#[allow(clippy::unwrap_used)] // Compile-time constant regex pattern
static CONVENTIONAL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?P<type>[a-z]+)(?:\((?P<scope>[^)]+)\))?(?P<breaking>!)?:\s*(?P<description>.+)$",
    )
    .unwrap()
});

#[allow(clippy::unwrap_used)] // Patterns are built from the fixed vocabulary
static ACTION_WORD_PATTERNS: LazyLock<Vec<(ActionWord, Regex)>> = LazyLock::new(|| {
    ActionWord::ALL
        .into_iter()
        .map(|word| {
            let pattern = format!(r"(?i)\b{}\b", regex::escape(word.as_str()));
            (word, Regex::new(&pattern).unwrap())
        })
        .collect()
});

/// Parses a raw commit message. Never fails; anything that is not a
/// conventional commit comes back with `is_conventional == false`.
///
/// The second line is dropped unconditionally as the blank separator, even
/// when it is not blank.
pub fn parse(raw: &str) -> CommitMessage {
    let lines = split_lines(raw.trim());
    let subject = lines.first().copied().unwrap_or_default().to_string();
    let body = lines.get(2..).map(|rest| rest.join("\n")).unwrap_or_default();

    let mut message = CommitMessage {
        subject: subject.clone(),
        body,
        commit_type: None,
        scope: None,
        breaking: false,
        description: subject.clone(),
        is_conventional: false,
    };

    if let Some(captures) = CONVENTIONAL_PATTERN.captures(&subject) {
        message.commit_type = captures.name("type").map(|m| m.as_str().to_lowercase());
        message.scope = captures.name("scope").map(|m| m.as_str().to_string());
        message.breaking = captures.name("breaking").is_some();
        if let Some(description) = captures.name("description") {
            message.description = description.as_str().to_string();
        }
        message.is_conventional = true;
    }

    message
}

/// Line terminators recognised when splitting a message.
const LINE_BREAKS: [char; 10] = [
    '\n', '\r', '\x0b', '\x0c', '\x1c', '\x1d', '\x1e', '\u{85}', '\u{2028}', '\u{2029}',
];

/// Splits on every line terminator, treating `\r\n` as one break. A trailing
/// terminator does not produce an empty final line.
fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, ch)) = chars.next() {
        if !LINE_BREAKS.contains(&ch) {
            continue;
        }
        lines.push(&text[start..idx]);
        start = idx + ch.len_utf8();
        if ch == '\r' {
            if let Some(&(next, '\n')) = chars.peek() {
                chars.next();
                start = next + 1;
            }
        }
    }

    if start < text.len() {
        lines.push(&text[start..]);
    }
    lines
}

/// Action words found in a piece of text, with their expectations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionWords(BTreeMap<ActionWord, ActionExpectation>);

impl ActionWords {
    /// Returns `true` if `word` was found.
    pub fn contains(&self, word: ActionWord) -> bool {
        self.0.contains_key(&word)
    }

    /// Returns the expectation for `word`, if it was found.
    pub fn get(&self, word: ActionWord) -> Option<&ActionExpectation> {
        self.0.get(&word)
    }

    /// Iterates over the found words in vocabulary order.
    pub fn iter(&self) -> impl Iterator<Item = (ActionWord, &ActionExpectation)> {
        self.0.iter().map(|(word, expectation)| (*word, expectation))
    }

    /// Number of distinct words found.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no action word was found.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Finds whole-word, case-insensitive occurrences of the action vocabulary.
pub fn extract_action_words(text: &str) -> ActionWords {
    ActionWords(
        ACTION_WORD_PATTERNS
            .iter()
            .filter(|(_, pattern)| pattern.is_match(text))
            .map(|(word, _)| (*word, word.expectation()))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_conventional_subject() {
        let msg = parse("feat(parser)!: Support Nested Scopes\n\nLonger body\nsecond line");
        assert!(msg.is_conventional);
        assert_eq!(msg.commit_type.as_deref(), Some("feat"));
        assert_eq!(msg.scope.as_deref(), Some("parser"));
        assert!(msg.breaking);
        assert_eq!(msg.description, "Support Nested Scopes");
        assert_eq!(msg.body, "Longer body\nsecond line");
    }

    #[test]
    fn splits_on_every_line_terminator() {
        assert_eq!(parse("fix: a\rb").subject, "fix: a");
        assert_eq!(parse("fix: a\u{2028}b").subject, "fix: a");
        assert_eq!(parse("fix: a\x0cb").subject, "fix: a");

        let msg = parse("fix: a\r\n\r\nbody one\rbody two");
        assert_eq!(msg.subject, "fix: a");
        assert_eq!(msg.body, "body one\nbody two");
    }

    #[test]
    fn split_lines_keeps_blank_lines() {
        assert_eq!(split_lines("a\n\nb\n"), vec!["a", "", "b"]);
        assert_eq!(split_lines("a\r\nb"), vec!["a", "b"]);
        assert!(split_lines("").is_empty());
    }

    #[test]
    fn type_is_lowercased_scope_keeps_case() {
        let msg = parse("FIX(Auth): patch token check");
        assert_eq!(msg.commit_type.as_deref(), Some("fix"));
        assert_eq!(msg.scope.as_deref(), Some("Auth"));
        assert!(!msg.breaking);
    }

    #[test]
    fn non_conventional_falls_back_to_subject() {
        let msg = parse("Update the readme");
        assert!(!msg.is_conventional);
        assert_eq!(msg.commit_type, None);
        assert_eq!(msg.scope, None);
        assert_eq!(msg.description, "Update the readme");
    }

    #[test]
    fn pattern_must_match_from_start() {
        let msg = parse("Revert \"feat: add exporter\"");
        assert!(!msg.is_conventional);
    }

    #[test]
    fn empty_description_is_not_conventional() {
        let msg = parse("fix:");
        assert!(!msg.is_conventional);
        assert_eq!(msg.description, "fix:");
    }

    #[test]
    fn second_line_is_dropped_even_when_not_blank() {
        let msg = parse("subject\nnot blank\nbody");
        assert_eq!(msg.subject, "subject");
        assert_eq!(msg.body, "body");
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        let msg = parse("\n\n  docs: tidy up  \n");
        assert_eq!(msg.subject, "docs: tidy up");
        assert_eq!(msg.body, "");
    }

    #[test]
    fn empty_message() {
        let msg = parse("");
        assert_eq!(msg.subject, "");
        assert_eq!(msg.description, "");
        assert!(!msg.is_conventional);
    }

    #[test]
    fn known_type_lookup() {
        use crate::audit::vocabulary::CommitType;

        assert_eq!(parse("revert: undo").known_type(), Some(CommitType::Revert));
        assert_eq!(parse("wip: stuff").known_type(), None);
        assert_eq!(parse("wip: stuff").commit_type.as_deref(), Some("wip"));
    }

    #[test]
    fn action_words_whole_word_only() {
        let words = extract_action_words("Added address handling");
        assert!(!words.contains(ActionWord::Add));
        assert!(words.is_empty());
    }

    #[test]
    fn action_words_case_insensitive() {
        let words = extract_action_words("Fix TYPO in header");
        assert!(words.contains(ActionWord::Fix));
        assert!(words.contains(ActionWord::Typo));
        assert_eq!(words.len(), 2);
        assert_eq!(
            words.get(ActionWord::Typo).and_then(|e| e.max_changed),
            Some(20)
        );
    }

    #[test]
    fn action_words_repeated_occurrences_count_once() {
        let words = extract_action_words("remove foo, remove bar, remove baz");
        assert_eq!(words.len(), 1);
        assert!(words.contains(ActionWord::Remove));
    }

    #[test]
    fn action_words_iterate_in_vocabulary_order() {
        let words = extract_action_words("tiny update to add and move things");
        let found: Vec<ActionWord> = words.iter().map(|(w, _)| w).collect();
        assert_eq!(
            found,
            vec![
                ActionWord::Add,
                ActionWord::Move,
                ActionWord::Update,
                ActionWord::Tiny
            ]
        );
    }

    mod prop {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn description_never_empty_for_nonempty_subject(s in ".*") {
                let msg = parse(&s);
                if !msg.subject.is_empty() {
                    prop_assert!(!msg.description.is_empty());
                }
            }

            #[test]
            fn type_and_scope_only_when_conventional(s in "[a-zA-Z(): !\n]{0,40}") {
                let msg = parse(&s);
                if !msg.is_conventional {
                    prop_assert!(msg.commit_type.is_none());
                    prop_assert!(msg.scope.is_none());
                    prop_assert!(!msg.breaking);
                } else {
                    prop_assert!(msg.commit_type.is_some());
                }
            }

            #[test]
            fn extraction_is_deterministic(s in ".*") {
                prop_assert_eq!(extract_action_words(&s), extract_action_words(&s));
            }
        }
    }
}
