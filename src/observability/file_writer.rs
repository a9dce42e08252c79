//! Rotating log file writer with size-based rotation and backup retention.
//!
//! The terminal belongs to the UI while the selection is running, so log
//! output goes to a file instead. When the file grows past its size limit it
//! is shifted to `<name>.1`, older backups move up one number, and anything
//! beyond the retention count is removed:
//!
//! ```text
//! gopkg-search.log    → gopkg-search.log.1
//! gopkg-search.log.1  → gopkg-search.log.2
//! gopkg-search.log.3  → (deleted)
//! ```

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Maximum file size before rotation (10 MB).
pub const MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// Number of backup files to retain after rotation.
pub const MAX_BACKUP_FILES: usize = 3;

/// Thread-safe rotating file writer.
///
/// `&FileWriter` implements [`io::Write`], so an `Arc<FileWriter>` can be
/// handed to `tracing_subscriber::fmt` as its writer. Worker threads and the
/// event loop share the same instance; the internal mutex serializes writes.
///
/// # Example
///
/// ```rust
/// use std::io::Write;
/// use gopkg_search::observability::FileWriter;
///
/// let dir = std::env::temp_dir().join("gopkg-search-doc");
/// std::fs::create_dir_all(&dir).unwrap();
/// let writer = FileWriter::new(dir.join("doc.log"));
/// (&writer).write_all(b"hello\n").unwrap();
/// ```
pub struct FileWriter {
    file_path: PathBuf,
    max_bytes: u64,
    max_backups: usize,
    /// Lazily opened on first write.
    file: Mutex<Option<File>>,
}

impl FileWriter {
    /// Creates a writer with the default limits (10 MB, 3 backups).
    ///
    /// The file is not opened until the first write.
    #[must_use]
    pub const fn new(file_path: PathBuf) -> Self {
        Self::with_limits(file_path, MAX_FILE_SIZE_BYTES, MAX_BACKUP_FILES)
    }

    /// Creates a writer with explicit rotation limits.
    #[must_use]
    pub const fn with_limits(file_path: PathBuf, max_bytes: u64, max_backups: usize) -> Self {
        Self {
            file_path,
            max_bytes,
            max_backups,
            file: Mutex::new(None),
        }
    }

    /// Path of the active log file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn backup_path(&self, n: usize) -> PathBuf {
        let mut name = self.file_path.as_os_str().to_os_string();
        name.push(format!(".{n}"));
        PathBuf::from(name)
    }

    fn write_locked(&self, buf: &[u8]) -> io::Result<()> {
        let mut guard = self
            .file
            .lock()
            .map_err(|e| io::Error::other(format!("log writer mutex poisoned: {e}")))?;

        if fs::metadata(&self.file_path).is_ok_and(|m| m.len() >= self.max_bytes) {
            *guard = None;
            self.rotate_files()?;
        }

        let file = match guard.as_mut() {
            Some(file) => file,
            None => guard.insert(OpenOptions::new().create(true).append(true).open(&self.file_path)?),
        };

        file.write_all(buf)?;
        file.flush()
    }

    /// Shifts backups up by one and moves the active file to `.1`.
    fn rotate_files(&self) -> io::Result<()> {
        if self.max_backups == 0 {
            return fs::remove_file(&self.file_path).or_else(ignore_missing);
        }

        fs::remove_file(self.backup_path(self.max_backups)).or_else(ignore_missing)?;
        for n in (1..self.max_backups).rev() {
            let from = self.backup_path(n);
            if from.exists() {
                fs::rename(&from, self.backup_path(n + 1))?;
            }
        }
        fs::rename(&self.file_path, self.backup_path(1)).or_else(ignore_missing)
    }
}

fn ignore_missing(e: io::Error) -> io::Result<()> {
    if e.kind() == io::ErrorKind::NotFound {
        Ok(())
    } else {
        Err(e)
    }
}

impl Write for &FileWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_locked(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl std::fmt::Debug for FileWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileWriter")
            .field("file_path", &self.file_path)
            .finish_non_exhaustive()
    }
}
