//! # diffmatch
//!
//! Audits whether a commit message matches the diff it describes.
//!
//! ## Features
//!
//! - Conventional-commit parsing and action-word extraction
//! - File categorization (test, docs, config, ci, style, build, code)
//! - A fixed battery of heuristic checks producing pass/warn/fail verdicts
//! - Text, JSON and YAML reports, plus a commit-msg hook installer
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use diffmatch::audit::Auditor;
//! use diffmatch::git::GitRepository;
//!
//! let repo = GitRepository::open()?;
//! let outcome = Auditor::new(&repo).audit("HEAD");
//! println!("{:?}", outcome.verdict());
//! # Ok::<(), diffmatch::git::GatewayError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod audit;
pub mod cli;
pub mod data;
pub mod git;
pub mod utils;

pub use crate::cli::Cli;

/// The current version of diffmatch.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
