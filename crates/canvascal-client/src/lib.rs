//! CLI, configuration, downloads and export commands
//!
//! This crate provides the `canvascal` command-line interface.

pub mod cli;
pub mod commands;
pub mod config;
pub mod download;
pub mod error;

pub use cli::Cli;
pub use download::{FsDownloadTarget, StderrNotifier};
pub use error::{ClientError, ClientResult};
