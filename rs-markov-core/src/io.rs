use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{MarkovError, Result};

/// Reads a corpus file whole, as UTF-8.
///
/// - A missing file maps to `SourceNotFound` so the caller can stop before building
/// - Any other failure (permissions, invalid UTF-8) is a plain I/O error
pub(crate) fn read_source<P: AsRef<Path>>(filename: P) -> Result<String> {
	let path = filename.as_ref();
	fs::read_to_string(path).map_err(|e| match e.kind() {
		ErrorKind::NotFound => MarkovError::SourceNotFound(path.to_path_buf()),
		_ => MarkovError::Io(e),
	})
}

/// Writes `contents` to `path`, replacing any previous file.
pub(crate) fn write_text<P: AsRef<Path>>(path: P, contents: &str) -> Result<()> {
	fs::write(path, contents)?;
	Ok(())
}

/// Builds a file path inside `dir` from a prefix and the source filename.
///
/// Example:
/// `Table` + `"2"` + `"book.txt"` → `Table/2_book.txt`
pub(crate) fn prefixed_path<P: AsRef<Path>>(dir: P, prefix: &str, filename: &str) -> PathBuf {
	dir.as_ref().join(format!("{prefix}_{filename}"))
}

/// Fails with `MissingDirectory` unless `path` is an existing directory.
pub(crate) fn require_dir(role: &'static str, path: &Path) -> Result<()> {
	if path.is_dir() {
		Ok(())
	} else {
		Err(MarkovError::MissingDirectory { role, path: path.to_path_buf() })
	}
}
