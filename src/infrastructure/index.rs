//! Go module index provider.
//!
//! The index at `https://index.golang.org/index` streams newline-delimited JSON,
//! one record per module version:
//!
//! ```text
//! {"Path":"golang.org/x/text","Version":"v0.3.0","Timestamp":"2019-04-10T19:08:52.997264Z"}
//! ```
//!
//! Lines that fail to decode are logged and skipped. Transport failures (no
//! connection, non-200 status, a body that stops mid-read) fail the whole load.

use std::collections::HashMap;
use std::io::BufRead;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::domain::error::{GopkgError, Result};
use crate::domain::Entry;

/// Source of the entry corpus.
///
/// Implementations block until the full corpus is available. The runner calls
/// this off the event loop thread.
pub trait IndexProvider: Send + Sync {
    /// Fetches every entry, in feed order.
    ///
    /// # Errors
    ///
    /// Returns [`GopkgError::Transport`] when the corpus cannot be retrieved.
    fn fetch(&self) -> Result<Vec<Entry>>;
}

/// One line of the index feed.
#[derive(Debug, Deserialize)]
struct IndexRecord {
    #[serde(rename = "Path")]
    path: String,
    #[serde(rename = "Version", default)]
    version: Option<String>,
    #[serde(rename = "Timestamp", default)]
    timestamp: Option<DateTime<Utc>>,
}

/// Index provider backed by an HTTP GET.
#[derive(Debug, Clone)]
pub struct HttpIndex {
    url: String,
    client: reqwest::blocking::Client,
}

impl HttpIndex {
    /// Creates a provider for `url` with a whole-request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`GopkgError::Transport`] if the HTTP client cannot be built
    /// (for example when no TLS backend is available).
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GopkgError::Transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { url: url.into(), client })
    }

    /// The URL this provider fetches.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl IndexProvider for HttpIndex {
    fn fetch(&self) -> Result<Vec<Entry>> {
        let _span = tracing::info_span!("fetch_index", url = %self.url).entered();

        let response = self
            .client
            .get(&self.url)
            .send()
            .map_err(|e| GopkgError::Transport(format!("failed to fetch Go index: {e}")))?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(GopkgError::Transport(format!(
                "received non-OK status from Go index: {status}"
            )));
        }

        tracing::debug!(%status, "index response received");
        parse_index(std::io::BufReader::new(response))
    }
}

/// Decodes a newline-delimited JSON index feed.
///
/// Blank lines, malformed lines and records without a path are skipped with a
/// warning. A path seen more than once keeps its first position and takes the
/// version and timestamp of its latest occurrence.
///
/// # Errors
///
/// Returns [`GopkgError::Transport`] if reading from `reader` fails.
///
/// # Examples
///
/// ```
/// use gopkg_search::infrastructure::index::parse_index;
///
/// let feed = "{\"Path\":\"golang.org/x/text\",\"Version\":\"v0.3.0\"}\nnot json\n";
/// let entries = parse_index(feed.as_bytes()).unwrap();
/// assert_eq!(entries.len(), 1);
/// assert_eq!(entries[0].label.as_deref(), Some("v0.3.0"));
/// ```
pub fn parse_index(mut reader: impl BufRead) -> Result<Vec<Entry>> {
    let mut entries: Vec<Entry> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut buf = Vec::new();
    let mut line_number = 0usize;
    let mut skipped = 0usize;

    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .map_err(|e| GopkgError::Transport(format!("error reading Go index response: {e}")))?;
        if read == 0 {
            break;
        }
        line_number += 1;

        let line = buf.trim_ascii();
        if line.is_empty() {
            continue;
        }

        let record = match serde_json::from_slice::<IndexRecord>(line) {
            Ok(record) if !record.path.is_empty() => record,
            Ok(_) => {
                skipped += 1;
                tracing::warn!(line = line_number, "index record without a path, skipping");
                continue;
            }
            Err(e) => {
                skipped += 1;
                let error = GopkgError::Decode {
                    line: line_number,
                    reason: e.to_string(),
                };
                tracing::warn!(error = %error, "skipping index line");
                continue;
            }
        };

        let mut entry = Entry::new(record.path);
        entry.label = record.version;
        entry.observed_at = record.timestamp;

        match positions.get(&entry.id) {
            Some(&index) => entries[index] = entry,
            None => {
                positions.insert(entry.id.clone(), entries.len());
                entries.push(entry);
            }
        }
    }

    tracing::debug!(
        lines = line_number,
        entries = entries.len(),
        skipped = skipped,
        "index decoded"
    );

    Ok(entries)
}
