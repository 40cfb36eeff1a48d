//! File cache with an mtime TTL
//!
//! Read/write of UTF-8 text keyed by a filesystem path. Staleness is governed
//! purely by the file's mtime against a wall-clock TTL; there is no explicit
//! invalidation. Concurrent writers are tolerated without locking: the cached
//! content is idempotently derived from backend state, so the last writer
//! wins and the worst case is a redundant rebuild.
//!
//! A miss (absent, stale, or unreadable file) is a normal outcome reported as
//! `None`, not an error. Write failures are surfaced so the caller can warn
//! and continue; they must never be fatal to returning a freshly built
//! result.

use std::fs;
use std::path::Path;
use std::time::{Duration, SystemTime};

/// Error type for cache writes
#[derive(Debug)]
pub enum CacheError {
    IoError(String),
}

impl std::fmt::Display for CacheError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CacheError::IoError(msg) => write!(f, "IO error: {}", msg),
        }
    }
}

impl std::error::Error for CacheError {}

impl From<std::io::Error> for CacheError {
    fn from(err: std::io::Error) -> Self {
        CacheError::IoError(err.to_string())
    }
}

/// Read a cache file younger than `max_age`
///
/// Returns `None` when the file does not exist, its metadata or contents
/// cannot be read, or `now - mtime >= max_age`.
pub fn read_fresh(path: &Path, max_age: Duration) -> Option<String> {
    let metadata = fs::metadata(path).ok()?;
    let mtime = metadata.modified().ok()?;
    let age = SystemTime::now().duration_since(mtime).ok()?;

    if age >= max_age {
        return None;
    }

    fs::read_to_string(path).ok()
}

/// Write a cache file, creating parent directories as needed
pub fn write(path: &Path, contents: &str) -> Result<(), CacheError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)?;
    Ok(())
}
