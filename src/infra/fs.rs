//! Filesystem operations for the export tree with atomic writes.

use std::io::{self, Write as IoWrite};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

use crate::infra::sanitize::sanitize_filename;

/// Errors during export filesystem operations.
#[derive(Debug, Error)]
pub enum FsError {
    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("atomic write failed for {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Creates a directory and any missing parents.
pub fn create_dir(path: &Path) -> Result<(), FsError> {
    std::fs::create_dir_all(path).map_err(|source| FsError::CreateDir {
        path: path.into(),
        source,
    })
}

/// Writes `content` to `path` atomically.
///
/// Uses a temporary file in the same directory and an atomic rename, so a
/// file is either fully written or not present at all. The parent directory
/// must exist.
pub fn write_atomic(path: &Path, content: &str) -> Result<(), FsError> {
    let parent = path.parent().filter(|p| !p.as_os_str().is_empty());
    let mut tmp =
        NamedTempFile::new_in(parent.unwrap_or(Path::new("."))).map_err(|source| FsError::Write {
            path: path.into(),
            source,
        })?;
    tmp.write_all(content.as_bytes())
        .map_err(|source| FsError::Write {
            path: path.into(),
            source,
        })?;
    tmp.persist(path).map_err(|e| FsError::Write {
        path: path.into(),
        source: e.error,
    })?;
    Ok(())
}

/// Resolves a collision-free file path for `name` under `dir`.
///
/// The name is sanitized first; when `{name}{extension}` already exists,
/// `_1`, `_2`, ... suffixes are tried until a free path is found. The check
/// probes the real destination, so files written earlier in the same run
/// count just as much as pre-existing ones.
pub fn unique_path(dir: &Path, name: &str, extension: &str) -> PathBuf {
    let base = sanitize_filename(name);
    let candidate = dir.join(format!("{base}{extension}"));
    if !candidate.exists() {
        return candidate;
    }

    let mut counter = 1;
    loop {
        let candidate = dir.join(format!("{base}_{counter}{extension}"));
        if !candidate.exists() {
            return candidate;
        }
        counter += 1;
    }
}
