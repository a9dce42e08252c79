//! gopkg-search: an interactive fuzzy finder for Go module paths.
//!
//! The finder downloads the Go module index, lets the user narrow it with a
//! fuzzy query, and copies the confirmed module path to the system clipboard.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Binary (main.rs)                                   │  ← Entry point
//! │  - Config, logging, terminal setup                  │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Runtime (runtime.rs)                               │  ← Event loop
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Selection state and invariants                   │
//! │  - Pure transition function                         │
//! │  - Action emission                                  │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Search        │   │ Worker Layer  │
//! │ (ui/)         │   │ (search/)     │   │ (worker/)     │
//! │ - View models │   │ - Fuzzy match │   │ - Load index  │
//! │ - Theming     │   │ - Ranking     │   │ - Copy text   │
//! │ - Components  │   │ - Highlights  │   │               │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Index over HTTP, clipboard, terminal, paths      │
//! │  - Entry model and error types (domain/)            │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - tracing to a rotating log file                   │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! Settings come from, lowest precedence first: built-in defaults, the TOML
//! file at `<config dir>/gopkg-search/config.toml`, and `GOPKG_SEARCH_<KEY>`
//! environment variables.
//!
//! ```toml
//! index_url = "https://index.golang.org/index"
//! request_timeout_secs = 30
//! page_size = 20
//! chrome_rows = 10
//! theme = "catppuccin-mocha"
//! trace_level = "debug"
//! ```
//!
//! # Example
//!
//! ```rust
//! use gopkg_search::{transition, Event, SelectionState, Entry};
//! use gopkg_search::worker::TaskEvent;
//!
//! let state = SelectionState::new(20);
//! let (state, _) = transition(state, Event::Task(TaskEvent::LoadCompleted {
//!     entries: vec![Entry::new("foo/bar"), Entry::new("foo/baz"), Entry::new("qux")],
//! }));
//! let (state, _) = transition(state, Event::KeyTyped('q'));
//! assert_eq!(state.selected_entry().map(|e| e.id.as_str()), Some("qux"));
//! ```

#![allow(clippy::multiple_crate_versions)]

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod runtime;
pub mod search;
pub mod ui;
pub mod worker;

pub use app::{transition, Action, Event, Phase, SelectionState};
pub use domain::{Entry, EntryStore, GopkgError, Result};
pub use runtime::{EventLoop, Outcome};
pub use ui::Theme;

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

/// Index fetched when no URL is configured.
pub const DEFAULT_INDEX_URL: &str = "https://index.golang.org/index";

/// Prefix of the environment variables overriding configuration keys.
pub const ENV_PREFIX: &str = "GOPKG_SEARCH_";

/// Configuration keys recognized in the file and the environment.
const CONFIG_KEYS: [&str; 7] = [
    "index_url",
    "request_timeout_secs",
    "page_size",
    "chrome_rows",
    "theme",
    "theme_file",
    "trace_level",
];

/// Runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// URL of the newline-delimited JSON module index.
    pub index_url: String,

    /// Whole-request timeout for the index download, in seconds. Default: 30
    pub request_timeout_secs: u64,

    /// Visible rows before the first resize event. Default: 20
    pub page_size: usize,

    /// Terminal rows reserved for prompt and status line. Default: 10
    pub chrome_rows: usize,

    /// Built-in theme name: `default` or `catppuccin-mocha`.
    ///
    /// Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file.
    ///
    /// Takes precedence over `theme_name`. See [`ui::theme`] for format.
    pub theme_file: Option<String>,

    /// Log filter when `RUST_LOG` is unset.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            index_url: DEFAULT_INDEX_URL.to_string(),
            request_timeout_secs: 30,
            page_size: 20,
            chrome_rows: 10,
            theme_name: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from a flat string map.
    ///
    /// Unknown keys are ignored. Numeric values that do not parse, and a
    /// `page_size` of zero, fall back to their defaults. Empty strings count
    /// as unset.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use gopkg_search::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("page_size".to_string(), "15".to_string());
    /// map.insert("request_timeout_secs".to_string(), "soon".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.page_size, 15);
    /// assert_eq!(config.request_timeout_secs, 30);
    /// ```
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();
        let text = |key: &str| {
            map.get(key)
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(String::from)
        };

        Self {
            index_url: text("index_url").unwrap_or(defaults.index_url),
            request_timeout_secs: text("request_timeout_secs")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.request_timeout_secs),
            page_size: text("page_size")
                .and_then(|s| s.parse().ok())
                .filter(|n: &usize| *n > 0)
                .unwrap_or(defaults.page_size),
            chrome_rows: text("chrome_rows")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.chrome_rows),
            theme_name: text("theme"),
            theme_file: text("theme_file"),
            trace_level: text("trace_level"),
        }
    }

    /// Loads configuration from the default file location and the process
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns [`GopkgError::Config`] if the config file exists but cannot be
    /// read or is not valid TOML.
    pub fn load() -> Result<Self> {
        Self::load_from(&infrastructure::paths::get_config_file(), std::env::vars())
    }

    /// Loads configuration from `file` (if it exists) overlaid with `env`.
    ///
    /// Only `GOPKG_SEARCH_<KEY>` variables for known keys are considered.
    ///
    /// # Errors
    ///
    /// Returns [`GopkgError::Config`] if `file` exists but cannot be read or
    /// parsed.
    pub fn load_from<I>(file: &Path, env: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut map = BTreeMap::new();

        if file.exists() {
            let contents = std::fs::read_to_string(file)
                .map_err(|e| GopkgError::Config(format!("failed to read {}: {e}", file.display())))?;
            let table: toml::Table = contents
                .parse()
                .map_err(|e| GopkgError::Config(format!("failed to parse {}: {e}", file.display())))?;

            for (key, value) in table {
                let value = match value {
                    toml::Value::String(s) => s,
                    other => other.to_string(),
                };
                map.insert(key, value);
            }
        }

        for (name, value) in env {
            let Some(key) = name.strip_prefix(ENV_PREFIX) else {
                continue;
            };
            let key = key.to_ascii_lowercase();
            if CONFIG_KEYS.contains(&key.as_str()) {
                map.insert(key, value);
            }
        }

        Ok(Self::from_map(&map))
    }

    /// Index request timeout as a [`Duration`].
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Resolves the configured theme.
///
/// A theme file wins over a theme name; anything that fails to load falls
/// back to the default theme with a log line.
#[must_use]
pub fn load_theme(config: &Config) -> Theme {
    config.theme_file.as_ref().map_or_else(
        || {
            config.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
                Theme::from_name(theme_name).unwrap_or_else(|| {
                    tracing::warn!(theme_name = %theme_name, "unknown theme, using default");
                    Theme::default()
                })
            })
        },
        |theme_file| {
            Theme::from_file(theme_file).unwrap_or_else(|e| {
                tracing::warn!(theme_file = %theme_file, error = %e, "failed to load theme from file, using default");
                Theme::default()
            })
        },
    )
}

/// Creates the start-of-run selection state for `config`.
#[must_use]
pub fn initialize(config: &Config) -> SelectionState {
    tracing::debug!(
        index_url = %config.index_url,
        page_size = config.page_size,
        "initializing selection state"
    );

    SelectionState::new(config.page_size)
}
