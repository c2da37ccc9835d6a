//! # sdk-bootstrap
//!
//! Helpers for bootstrapping an engine build.
//!
//! Features:
//! - Streaming HTTP(S) download with a console progress bar
//! - SDK environment and debug library checks
//! - Engine binary lookup for benchmarks
//! - Console prompts and external project generator invocation

mod stream;
mod remote_file;
pub mod download_session;
pub mod error;
pub mod download_progress;
pub mod download_configuration;
pub mod downloader;
pub mod prompt;
pub mod sdk;
pub mod locate;
pub mod generator;
