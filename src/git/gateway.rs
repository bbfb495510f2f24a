//! Narrow interface between the audit engine and version control.

use thiserror::Error;

use crate::data::diff::{DiffStats, Rename};

/// Errors reported by a [`CommitGateway`].
#[derive(Error, Debug)]
pub enum GatewayError {
    /// The repository could not be opened.
    #[error("Failed to open git repository at {path}")]
    RepositoryNotFound {
        /// Path that was tried.
        path: String,
        /// Underlying git error.
        #[source]
        source: git2::Error,
    },

    /// The reference does not resolve to a commit.
    #[error("Unknown revision: {reference}")]
    UnknownRevision {
        /// Reference that failed to resolve.
        reference: String,
        /// Underlying git error.
        #[source]
        source: git2::Error,
    },

    /// The commit message is not valid UTF-8.
    #[error("Commit message of {reference} is not valid UTF-8")]
    InvalidMessage {
        /// Reference whose message could not be decoded.
        reference: String,
    },

    /// Any other git failure.
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),
}

/// Read-only access to the commit data the auditor needs.
///
/// Every call is independent and may fail; callers decide per call site
/// whether a failure is fatal or degrades to "no data".
pub trait CommitGateway {
    /// Returns the full commit message.
    fn commit_message(&self, reference: &str) -> Result<String, GatewayError>;

    /// Returns the subject line of the commit message.
    fn commit_subject(&self, reference: &str) -> Result<String, GatewayError>;

    /// Returns `true` if the commit has more than one parent.
    fn is_merge_commit(&self, reference: &str) -> Result<bool, GatewayError>;

    /// Returns per-file line counts against the first parent (or the empty
    /// tree for a root commit).
    fn diff_stats(&self, reference: &str) -> Result<DiffStats, GatewayError>;

    /// Returns renames detected against the first parent (or the empty tree).
    fn renames(&self, reference: &str) -> Result<Vec<Rename>, GatewayError>;
}

impl<T: CommitGateway + ?Sized> CommitGateway for &T {
    fn commit_message(&self, reference: &str) -> Result<String, GatewayError> {
        (**self).commit_message(reference)
    }

    fn commit_subject(&self, reference: &str) -> Result<String, GatewayError> {
        (**self).commit_subject(reference)
    }

    fn is_merge_commit(&self, reference: &str) -> Result<bool, GatewayError> {
        (**self).is_merge_commit(reference)
    }

    fn diff_stats(&self, reference: &str) -> Result<DiffStats, GatewayError> {
        (**self).diff_stats(reference)
    }

    fn renames(&self, reference: &str) -> Result<Vec<Rename>, GatewayError> {
        (**self).renames(reference)
    }
}
