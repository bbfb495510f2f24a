//! Git repository operations

use std::path::Path;

use git2::{Commit, Delta, Diff, DiffFindOptions, Patch, Repository};
use tracing::debug;

use crate::data::diff::{DiffStats, FileChange, Rename};
use crate::git::gateway::{CommitGateway, GatewayError};

/// Git repository wrapper backed by libgit2.
pub struct GitRepository {
    repo: Repository,
}

impl std::fmt::Debug for GitRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitRepository")
            .field("path", &self.repo.path())
            .finish()
    }
}

impl GitRepository {
    /// Opens the repository containing the current directory.
    pub fn open() -> Result<Self, GatewayError> {
        Self::open_at(".")
    }

    /// Opens the repository containing `path`, searching parent directories.
    pub fn open_at<P: AsRef<Path>>(path: P) -> Result<Self, GatewayError> {
        let path = path.as_ref();
        let repo = Repository::discover(path).map_err(|source| GatewayError::RepositoryNotFound {
            path: path.display().to_string(),
            source,
        })?;

        Ok(Self { repo })
    }

    /// Returns the `.git` directory.
    pub fn git_dir(&self) -> &Path {
        self.repo.path()
    }

    /// Lists up to `limit` commit ids reachable from HEAD, newest first.
    pub fn recent_commits(&self, limit: usize) -> Result<Vec<String>, GatewayError> {
        let mut walker = self.repo.revwalk()?;
        walker.push_head()?;

        walker
            .take(limit)
            .map(|oid| oid.map(|oid| oid.to_string()).map_err(GatewayError::from))
            .collect()
    }

    /// Resolves a reference (hash, branch, `HEAD~2`, ...) to a commit.
    fn find_commit(&self, reference: &str) -> Result<Commit<'_>, GatewayError> {
        self.repo
            .revparse_single(reference)
            .and_then(|object| object.peel_to_commit())
            .map_err(|source| GatewayError::UnknownRevision {
                reference: reference.to_string(),
                source,
            })
    }

    /// Diffs a commit against its first parent, or the empty tree for a root
    /// commit, with rename detection enabled.
    fn commit_diff(&self, commit: &Commit<'_>) -> Result<Diff<'_>, GatewayError> {
        let commit_tree = commit.tree()?;

        let parent_tree = if commit.parent_count() > 0 {
            Some(commit.parent(0)?.tree()?)
        } else {
            debug!(commit = %commit.id(), "Root commit, diffing against empty tree");
            None
        };

        let mut diff = self
            .repo
            .diff_tree_to_tree(parent_tree.as_ref(), Some(&commit_tree), None)?;

        let mut find_options = DiffFindOptions::new();
        find_options.renames(true);
        diff.find_similar(Some(&mut find_options))?;

        Ok(diff)
    }
}

/// Returns the path a delta is reported under (new side, falling back to old).
fn delta_path(diff: &Diff<'_>, idx: usize) -> String {
    diff.get_delta(idx)
        .and_then(|delta| delta.new_file().path().or_else(|| delta.old_file().path()))
        .map(|path| path.to_string_lossy().into_owned())
        .unwrap_or_default()
}

impl CommitGateway for GitRepository {
    fn commit_message(&self, reference: &str) -> Result<String, GatewayError> {
        debug!(reference, "Reading commit message");
        let commit = self.find_commit(reference)?;
        let message = commit.message().ok_or_else(|| GatewayError::InvalidMessage {
            reference: reference.to_string(),
        })?;
        Ok(message.trim().to_string())
    }

    fn commit_subject(&self, reference: &str) -> Result<String, GatewayError> {
        let commit = self.find_commit(reference)?;
        let subject = commit.summary().ok_or_else(|| GatewayError::InvalidMessage {
            reference: reference.to_string(),
        })?;
        Ok(subject.trim().to_string())
    }

    fn is_merge_commit(&self, reference: &str) -> Result<bool, GatewayError> {
        let commit = self.find_commit(reference)?;
        Ok(commit.parent_count() > 1)
    }

    fn diff_stats(&self, reference: &str) -> Result<DiffStats, GatewayError> {
        debug!(reference, "Computing diff statistics");
        let commit = self.find_commit(reference)?;
        let diff = self.commit_diff(&commit)?;

        let mut files = Vec::with_capacity(diff.deltas().len());
        for idx in 0..diff.deltas().len() {
            let path = delta_path(&diff, idx);

            // libgit2 yields no patch for binary deltas and flags them afterwards.
            match Patch::from_diff(&diff, idx)? {
                Some(patch) if !patch.delta().flags().is_binary() => {
                    let (_, added, deleted) = patch.line_stats()?;
                    files.push(FileChange::new(path, added, deleted));
                }
                Some(_) => files.push(FileChange::binary(path)),
                None => {
                    let binary = diff
                        .get_delta(idx)
                        .is_some_and(|delta| delta.flags().is_binary());
                    files.push(if binary {
                        FileChange::binary(path)
                    } else {
                        FileChange::new(path, 0, 0)
                    });
                }
            }
        }

        Ok(DiffStats::from_files(files))
    }

    fn renames(&self, reference: &str) -> Result<Vec<Rename>, GatewayError> {
        debug!(reference, "Detecting renames");
        let commit = self.find_commit(reference)?;
        let diff = self.commit_diff(&commit)?;

        let renames = diff
            .deltas()
            .filter(|delta| delta.status() == Delta::Renamed)
            .map(|delta| {
                let path_of = |file: git2::DiffFile<'_>| {
                    file.path()
                        .map(|p| p.to_string_lossy().into_owned())
                        .unwrap_or_default()
                };
                Rename::new(path_of(delta.old_file()), path_of(delta.new_file()))
            })
            .collect();

        Ok(renames)
    }
}
