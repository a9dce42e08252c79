//! Entry domain model and the write-once entry store.
//!
//! An [`Entry`] is one searchable item from the module index: a module path,
//! the version that was published, and when the index observed it. The
//! [`EntryStore`] owns the loaded entries for the rest of the run.

use chrono::{DateTime, Utc};

/// Number of seconds in one minute.
const SECONDS_PER_MINUTE: i64 = 60;

/// Number of seconds in one hour.
const SECONDS_PER_HOUR: i64 = 3600;

/// Number of seconds in one day.
const SECONDS_PER_DAY: i64 = 86400;

/// One searchable item with a unique identifier.
///
/// - `id`: module path, unique and non-empty within a store
/// - `label`: published version, if the index reported one
/// - `observed_at`: index timestamp, if present
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub id: String,
    pub label: Option<String>,
    pub observed_at: Option<DateTime<Utc>>,
}

impl Entry {
    /// Creates an entry with only an id.
    ///
    /// # Examples
    ///
    /// ```
    /// use gopkg_search::Entry;
    ///
    /// let entry = Entry::new("golang.org/x/text");
    /// assert_eq!(entry.id, "golang.org/x/text");
    /// assert!(entry.label.is_none());
    /// ```
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: None,
            observed_at: None,
        }
    }

    /// Sets the version label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Sets the observation timestamp.
    #[must_use]
    pub const fn with_observed_at(mut self, observed_at: DateTime<Utc>) -> Self {
        self.observed_at = Some(observed_at);
        self
    }

    /// Returns a human-readable string describing how long ago the index saw
    /// this entry, relative to `now`.
    ///
    /// - Less than 1 minute: "just now"
    /// - Less than 1 hour: "Xm ago"
    /// - Less than 1 day: "Xh ago"
    /// - 1 day or more: "Xd ago"
    ///
    /// Returns `None` when the entry has no timestamp.
    #[must_use]
    pub fn age(&self, now: DateTime<Utc>) -> Option<String> {
        let observed_at = self.observed_at?;
        let diff = (now - observed_at).num_seconds().max(0);

        Some(if diff < SECONDS_PER_MINUTE {
            "just now".to_string()
        } else if diff < SECONDS_PER_HOUR {
            format!("{}m ago", diff / SECONDS_PER_MINUTE)
        } else if diff < SECONDS_PER_DAY {
            format!("{}h ago", diff / SECONDS_PER_HOUR)
        } else {
            format!("{}d ago", diff / SECONDS_PER_DAY)
        })
    }
}

/// Ordered, immutable collection of loaded entries.
///
/// Built once from a completed load and only read afterwards. Order is the
/// order in which the index provider returned the entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryStore {
    entries: Vec<Entry>,
}

impl EntryStore {
    #[must_use]
    pub const fn new(entries: Vec<Entry>) -> Self {
        Self { entries }
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Entry> {
        self.entries.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Returns the searchable text of every entry, in store order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn age_buckets() {
        let now = Utc::now();
        let entry = |secs: i64| Entry::new("m").with_observed_at(now - Duration::seconds(secs));

        assert_eq!(entry(10).age(now).as_deref(), Some("just now"));
        assert_eq!(entry(300).age(now).as_deref(), Some("5m ago"));
        assert_eq!(entry(3 * 3600).age(now).as_deref(), Some("3h ago"));
        assert_eq!(entry(7 * 86400).age(now).as_deref(), Some("7d ago"));
    }

    #[test]
    fn age_without_timestamp_is_none() {
        assert!(Entry::new("m").age(Utc::now()).is_none());
    }

    #[test]
    fn future_timestamps_read_as_just_now() {
        let now = Utc::now();
        let entry = Entry::new("m").with_observed_at(now + Duration::hours(1));
        assert_eq!(entry.age(now).as_deref(), Some("just now"));
    }

    #[test]
    fn store_preserves_order() {
        let store = EntryStore::new(vec![Entry::new("b"), Entry::new("a")]);
        assert_eq!(store.ids().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(store.get(1).map(|e| e.id.as_str()), Some("a"));
        assert!(store.get(2).is_none());
    }
}
