//! File-based logging for a terminal UI.
//!
//! The terminal is in raw mode on the alternate screen for the whole run, so
//! nothing may be printed to it. All `tracing` output is written instead to a
//! rotating file in the data directory.
//!
//! # Architecture
//!
//! ```text
//! tracing macros → EnvFilter → fmt layer (no ANSI) → FileWriter → gopkg-search.log[.1..3]
//! ```
//!
//! # Configuration
//!
//! Trace level is controlled via:
//! 1. `RUST_LOG` environment variable (highest priority)
//! 2. `trace_level` config option
//! 3. Default: `"info"`
//!
//! # Modules
//!
//! - [`init`]: subscriber setup
//! - [`file_writer`]: rotating file writer with size-based rotation

mod file_writer;
mod init;

pub use file_writer::FileWriter;
pub use init::{init_tracing, LOG_FILE_NAME};
