//! Infrastructure layer: everything that talks to the outside world.
//!
//! - [`index`]: Go module index over HTTP
//! - [`clipboard`]: system clipboard through the platform utility
//! - [`terminal`]: raw-mode terminal, key mapping and frame drawing
//! - [`paths`]: config and data locations

pub mod clipboard;
pub mod index;
pub mod paths;
pub mod terminal;

pub use clipboard::{ClipboardCommand, CopySink, SystemClipboard};
pub use index::{parse_index, HttpIndex, IndexProvider};
pub use paths::{display_source, get_config_file, get_data_dir};
pub use terminal::{clip_line, map_key, viewport_rows, InputPump, Screen, TerminalScreen};
