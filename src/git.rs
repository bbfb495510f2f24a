//! Git access: the commit gateway, its libgit2 implementation, and hook files.

pub mod gateway;
pub mod hook;
pub mod repository;

pub use gateway::{CommitGateway, GatewayError};
pub use repository::GitRepository;

/// Number of hex characters to show in abbreviated commit hashes.
pub const SHORT_HASH_LEN: usize = 8;
