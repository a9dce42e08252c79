//! Application layer: selection state, events, and the transition function.
//!
//! # Architecture
//!
//! ```text
//! Keys / Resize / Task completions → Event → transition → (SelectionState, Actions)
//!                 ↑                                                 ↓
//!                 └────────────── TaskRunner ◀── Action::Spawn ─────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: side effect commands emitted by the transition function
//! - [`handler`]: event type and the transition function
//! - [`modes`]: lifecycle phase
//! - [`state`]: selection state container and its invariants

pub mod actions;
pub mod handler;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use handler::{transition, Event, QUIT_MESSAGE};
pub use modes::Phase;
pub use state::SelectionState;
