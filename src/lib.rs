//! gover - Go toolchain version manager
//!
//! Resolves version specifiers such as `1.21.`, `:tip` or `rev:abc123`
//! against a local mirror of the Go repository, builds the matching
//! toolchain once into a cache, and runs its `go` command.

pub mod builder;
pub mod cache;
pub mod cli;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod process;
pub mod repo;
pub mod session;
pub mod ui;
pub mod version;

pub use error::{GoverError, GoverResult};
