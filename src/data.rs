//! Data structures exchanged between the gateway, the audit engine and the CLI.

pub mod audit;
pub mod diff;
pub mod message;
pub mod yaml;

pub use audit::*;
pub use diff::*;
pub use message::*;
pub use yaml::*;
