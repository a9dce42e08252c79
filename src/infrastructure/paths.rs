//! Filesystem locations for configuration and logs.
//!
//! Both follow the platform conventions reported by `dirs`:
//!
//! | Purpose | Linux                                   | macOS                                          |
//! |---------|-----------------------------------------|------------------------------------------------|
//! | Config  | `~/.config/gopkg-search/config.toml`    | `~/Library/Application Support/gopkg-search/…` |
//! | Logs    | `~/.local/share/gopkg-search/`          | `~/Library/Application Support/gopkg-search/`  |
//!
//! When the platform directory cannot be determined the current directory is
//! used instead.

use std::path::PathBuf;

/// Directory name used under the platform config and data directories.
pub const APP_DIR: &str = "gopkg-search";

/// Returns the data directory holding the log files.
#[must_use]
pub fn get_data_dir() -> PathBuf {
    dirs::data_dir().unwrap_or_else(|| PathBuf::from(".")).join(APP_DIR)
}

/// Returns the path of the optional TOML configuration file.
#[must_use]
pub fn get_config_file() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join("config.toml")
}

/// Strips the URL scheme for display, e.g. in the loading message.
///
/// ```
/// use gopkg_search::infrastructure::paths::display_source;
///
/// assert_eq!(display_source("https://index.golang.org/index"), "index.golang.org/index");
/// assert_eq!(display_source("file.ndjson"), "file.ndjson");
/// ```
#[must_use]
pub fn display_source(url: &str) -> &str {
    url.split_once("://").map_or(url, |(_, rest)| rest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locations_end_in_app_dir() {
        assert!(get_data_dir().ends_with(APP_DIR));
        assert!(get_config_file().ends_with("gopkg-search/config.toml"));
    }

    #[test]
    fn display_source_keeps_host_and_path() {
        assert_eq!(display_source("http://127.0.0.1:8080/index"), "127.0.0.1:8080/index");
    }
}
