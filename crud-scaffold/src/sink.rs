//! Output file sink
//!
//! The builder never touches the filesystem directly; everything goes through
//! a [`FileSink`] so commits and discards can be exercised against a mock.

use std::fs;
use std::io;
use std::path::Path;

/// Filesystem operations needed to commit or discard a build
///
/// # Examples
///
/// ```rust,no_run
/// use crud_scaffold::sink::{FileSink, LocalFileSink};
/// use std::path::Path;
///
/// # fn example() -> std::io::Result<()> {
/// let sink = LocalFileSink;
/// let path = Path::new("app/admin/model/Article.php");
/// if !sink.exists(path) {
///     sink.ensure_dir(Path::new("app/admin/model"))?;
///     sink.write(path, "<?php")?;
/// }
/// # Ok(())
/// # }
/// ```
#[cfg_attr(test, mockall::automock)]
pub trait FileSink {
    /// Whether `path` exists
    fn exists(&self, path: &Path) -> bool;

    /// Create `dir` and any missing parents
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    fn ensure_dir(&self, dir: &Path) -> io::Result<()>;

    /// Write `content` to `path`, replacing any existing file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    fn write(&self, path: &Path, content: &str) -> io::Result<()>;

    /// Remove the file at `path`
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be removed.
    fn delete(&self, path: &Path) -> io::Result<()>;
}

/// [`FileSink`] over the local filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSink;

impl FileSink for LocalFileSink {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn ensure_dir(&self, dir: &Path) -> io::Result<()> {
        fs::create_dir_all(dir)
    }

    fn write(&self, path: &Path, content: &str) -> io::Result<()> {
        fs::write(path, content)
    }

    fn delete(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }
}
