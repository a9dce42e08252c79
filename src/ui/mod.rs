//! User interface rendering layer with component-based architecture.
//!
//! The UI layer turns selection state into ANSI-styled text lines:
//!
//! ```text
//! SelectionState → UIViewModel::compute → UIViewModel → render_viewmodel → Vec<String>
//! ```
//!
//! Nothing here touches the terminal. Drawing the lines is the job of
//! [`crate::infrastructure::terminal`].
//!
//! # Modules
//!
//! - [`viewmodel`]: view model types representing renderable UI state
//! - [`renderer`]: top-level rendering coordinator
//! - [`components`]: composable UI component renderers
//! - [`helpers`]: shared rendering utilities (highlighting, coloring)
//! - [`theme`]: color scheme definitions and ANSI escape sequence generation

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::{render, render_viewmodel};
pub use theme::Theme;
pub use viewmodel::{
    BrowseInfo, DisplayItem, EmptyState, FinalMessage, FooterInfo, LoadingInfo, SearchBarInfo, UIViewModel,
};
