//! Fixed vocabularies: conventional-commit types and action words.
//!
//! Both tables are constant data. Every lookup goes through `match`, so there
//! is nothing to initialise or mutate at runtime.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which way a diff is expected to lean.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeDirection {
    /// Mostly inserted lines.
    Additions,
    /// Mostly removed lines.
    Deletions,
}

/// Known conventional-commit types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommitType {
    /// A new feature.
    Feat,
    /// A bug fix.
    Fix,
    /// Documentation only.
    Docs,
    /// Formatting, no logic change.
    Style,
    /// Restructuring without behaviour change.
    Refactor,
    /// Performance improvement.
    Perf,
    /// Tests only.
    Test,
    /// Build system or dependencies.
    Build,
    /// Continuous integration configuration.
    Ci,
    /// Maintenance.
    Chore,
    /// Reverts an earlier commit.
    Revert,
}

impl CommitType {
    /// All known types in table order.
    pub const ALL: [Self; 11] = [
        Self::Feat,
        Self::Fix,
        Self::Docs,
        Self::Style,
        Self::Refactor,
        Self::Perf,
        Self::Test,
        Self::Build,
        Self::Ci,
        Self::Chore,
        Self::Revert,
    ];

    /// Looks up a lowercase type token.
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == token)
    }

    /// Returns the lowercase token for this type.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Feat => "feat",
            Self::Fix => "fix",
            Self::Docs => "docs",
            Self::Style => "style",
            Self::Refactor => "refactor",
            Self::Perf => "perf",
            Self::Test => "test",
            Self::Build => "build",
            Self::Ci => "ci",
            Self::Chore => "chore",
            Self::Revert => "revert",
        }
    }

    /// Direction a diff of this type is expected to lean, if any.
    pub const fn expected_direction(self) -> Option<ChangeDirection> {
        match self {
            Self::Feat => Some(ChangeDirection::Additions),
            Self::Revert => Some(ChangeDirection::Deletions),
            _ => None,
        }
    }
}

impl fmt::Display for CommitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Words in a commit description that imply a particular diff shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ActionWord {
    /// "add"
    Add,
    /// "create"
    Create,
    /// "remove"
    Remove,
    /// "delete"
    Delete,
    /// "rename"
    Rename,
    /// "move"
    Move,
    /// "fix"
    Fix,
    /// "update"
    Update,
    /// "typo"
    Typo,
    /// "whitespace"
    Whitespace,
    /// "comment"
    Comment,
    /// "minor"
    Minor,
    /// "small"
    Small,
    /// "tiny"
    Tiny,
}

/// Diff shape implied by an action word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActionExpectation {
    /// Direction the diff should lean.
    pub direction: Option<ChangeDirection>,
    /// Whether the diff should contain renames.
    pub expects_renames: bool,
    /// Upper bound on total changed lines.
    pub max_changed: Option<usize>,
}

impl ActionWord {
    /// The full vocabulary in table order.
    pub const ALL: [Self; 14] = [
        Self::Add,
        Self::Create,
        Self::Remove,
        Self::Delete,
        Self::Rename,
        Self::Move,
        Self::Fix,
        Self::Update,
        Self::Typo,
        Self::Whitespace,
        Self::Comment,
        Self::Minor,
        Self::Small,
        Self::Tiny,
    ];

    /// Returns the lowercase word.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Create => "create",
            Self::Remove => "remove",
            Self::Delete => "delete",
            Self::Rename => "rename",
            Self::Move => "move",
            Self::Fix => "fix",
            Self::Update => "update",
            Self::Typo => "typo",
            Self::Whitespace => "whitespace",
            Self::Comment => "comment",
            Self::Minor => "minor",
            Self::Small => "small",
            Self::Tiny => "tiny",
        }
    }

    /// Returns the diff expectations carried by this word.
    pub const fn expectation(self) -> ActionExpectation {
        const NONE: ActionExpectation = ActionExpectation {
            direction: None,
            expects_renames: false,
            max_changed: None,
        };

        match self {
            Self::Add | Self::Create => ActionExpectation {
                direction: Some(ChangeDirection::Additions),
                ..NONE
            },
            Self::Remove | Self::Delete => ActionExpectation {
                direction: Some(ChangeDirection::Deletions),
                ..NONE
            },
            Self::Rename | Self::Move => ActionExpectation {
                expects_renames: true,
                ..NONE
            },
            Self::Fix | Self::Update => NONE,
            Self::Typo => ActionExpectation {
                max_changed: Some(20),
                ..NONE
            },
            Self::Whitespace => ActionExpectation {
                max_changed: Some(50),
                ..NONE
            },
            Self::Comment | Self::Minor | Self::Small => ActionExpectation {
                max_changed: Some(30),
                ..NONE
            },
            Self::Tiny => ActionExpectation {
                max_changed: Some(15),
                ..NONE
            },
        }
    }
}

impl fmt::Display for ActionWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
