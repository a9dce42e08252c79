//! Domain layer for gopkg-search.
//!
//! Core types that do not depend on the terminal, the network or the clipboard.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`entry`]: Entry model and the write-once entry store

pub mod entry;
pub mod error;

pub use entry::{Entry, EntryStore};
pub use error::{GopkgError, Result};
