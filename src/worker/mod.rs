//! Background task execution.
//!
//! Network and clipboard I/O run on short-lived threads so the event loop keeps
//! reacting to keys (most importantly quit) while they are in flight.
//!
//! # Architecture
//!
//! - `messages`: request/completion protocol types
//! - `handler`: task runner that performs the I/O and reports completions

pub mod handler;
pub mod messages;

pub use handler::TaskRunner;
pub use messages::{Task, TaskEvent};
