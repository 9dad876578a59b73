use std::path::Path;

use crate::error::{ReplayError, Result};

/// Reads the whole log as trimmed lines.
///
/// The writer may be in the middle of a line, possibly inside a multi-byte
/// character, so invalid UTF-8 is replaced instead of failing the read.
pub fn read_lines(path: &Path) -> Result<Vec<String>> {
    let bytes = std::fs::read(path).map_err(|e| ReplayError::io(path, e))?;
    Ok(String::from_utf8_lossy(&bytes)
        .lines()
        .map(|line| line.trim_end().to_owned())
        .collect())
}
