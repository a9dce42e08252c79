//! Tracing initialization and subscriber setup.

use std::sync::Arc;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use super::file_writer::FileWriter;
use crate::Config;

/// Name of the active log file inside the data directory.
pub const LOG_FILE_NAME: &str = "gopkg-search.log";

/// Installs the global tracing subscriber writing to a rotating log file.
///
/// The filter comes from `RUST_LOG` when set, otherwise from
/// `config.trace_level`, otherwise `info`. Output is plain text (no ANSI
/// colors) in `<data dir>/gopkg-search.log`.
///
/// Returns the log file path, or `None` when logging could not be set up.
/// Logging is optional: failures here never stop the program. Only the first
/// call installs a subscriber.
///
/// # Example
///
/// ```rust,no_run
/// use gopkg_search::observability::init_tracing;
/// use gopkg_search::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
///
/// if let Some(path) = init_tracing(&config) {
///     tracing::debug!(log_file = %path.display(), "tracing is now active");
/// }
/// ```
pub fn init_tracing(config: &Config) -> Option<std::path::PathBuf> {
    let data_dir = crate::infrastructure::paths::get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return None;
    }

    let path = data_dir.join(LOG_FILE_NAME);
    let writer = Arc::new(FileWriter::new(path.clone()));

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = config.trace_level.as_deref().unwrap_or("info");
        EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"))
    });

    let fmt_layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_thread_names(true)
        .with_target(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .ok()
        .map(|()| path)
}
