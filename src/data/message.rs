//! Parsed commit message record.

use serde::{Deserialize, Serialize};

use crate::audit::vocabulary::CommitType;

/// A commit message split into its conventional-commit components.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitMessage {
    /// First line of the message.
    pub subject: String,
    /// Lines after the blank separator, joined with newlines.
    pub body: String,
    /// Lowercased conventional-commit type (e.g. `feat`), if the subject is conventional.
    #[serde(rename = "type")]
    pub commit_type: Option<String>,
    /// Conventional-commit scope with its original case.
    pub scope: Option<String>,
    /// Whether a `!` breaking marker precedes the colon.
    pub breaking: bool,
    /// Text after the colon, or the whole subject for non-conventional messages.
    pub description: String,
    /// Whether the subject matched the conventional-commit pattern.
    pub is_conventional: bool,
}

impl CommitMessage {
    /// Returns the conventional type if it is one of the known commit types.
    pub fn known_type(&self) -> Option<CommitType> {
        self.commit_type.as_deref().and_then(CommitType::from_token)
    }

    /// Checks whether the conventional type equals `commit_type`.
    pub fn has_type(&self, commit_type: CommitType) -> bool {
        self.known_type() == Some(commit_type)
    }

    /// Number of whitespace-separated tokens in the description.
    pub fn description_word_count(&self) -> usize {
        self.description.split_whitespace().count()
    }
}
