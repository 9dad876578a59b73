//! Cheap change detection on the log file, so unchanged input is not
//! re-read every poll.

use std::{io::ErrorKind, path::Path, time::SystemTime};

use tracing::warn;

/// Change indicator of the log: modification time plus length, so an
/// append inside the same mtime tick is still noticed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileStamp {
    pub modified: Option<SystemTime>,
    pub len: u64,
}

impl FileStamp {
    pub fn of(path: &Path) -> std::io::Result<Self> {
        let meta = std::fs::metadata(path)?;
        Ok(Self {
            // Platforms without mtime still get the length.
            modified: meta.modified().ok(),
            len: meta.len(),
        })
    }
}

/// Last stamp a scan succeeded against. Starts as "never scanned".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanCursor(Option<FileStamp>);

impl ScanCursor {
    pub const NEVER: Self = Self(None);

    #[must_use]
    pub fn last_seen(&self) -> Option<FileStamp> {
        self.0
    }

    pub fn record(&mut self, stamp: FileStamp) {
        self.0 = Some(stamp);
    }

    pub fn clear(&mut self) {
        self.0 = None;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    Missing,
    Unchanged,
    /// Worth a scan. `None` when the stamp could not be read, in which case
    /// the cursor is not advanced and the next poll scans again.
    Changed(Option<FileStamp>),
}

/// Compares the log's current stamp to `cursor`. Never suppresses a scan
/// it cannot prove redundant.
pub fn check(path: &Path, cursor: &ScanCursor) -> Freshness {
    match FileStamp::of(path) {
        Ok(stamp) if cursor.last_seen() == Some(stamp) => Freshness::Unchanged,
        Ok(stamp) => Freshness::Changed(Some(stamp)),
        Err(e) if e.kind() == ErrorKind::NotFound => Freshness::Missing,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "cannot stat log, scanning anyway");
            Freshness::Changed(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("board.log");
        assert_eq!(check(&path, &ScanCursor::NEVER), Freshness::Missing);
    }

    #[test]
    fn unchanged_until_append() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("board.log");
        std::fs::write(&path, "Move 1\n").unwrap();

        let mut cursor = ScanCursor::NEVER;
        let Freshness::Changed(Some(stamp)) = check(&path, &cursor) else {
            panic!("first check must ask for a scan");
        };
        cursor.record(stamp);
        assert_eq!(check(&path, &cursor), Freshness::Unchanged);

        let mut file = std::fs::OpenOptions::new().append(true).open(&path).unwrap();
        writeln!(file, "Player 1").unwrap();
        drop(file);
        assert!(matches!(check(&path, &cursor), Freshness::Changed(Some(_))));

        cursor.clear();
        assert!(matches!(check(&path, &cursor), Freshness::Changed(Some(_))));
    }

    #[cfg(unix)]
    #[test]
    fn stat_failure_still_scans() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("board.log");
        std::os::unix::fs::symlink(&path, &path).unwrap();
        assert_eq!(check(&path, &ScanCursor::NEVER), Freshness::Changed(None));
    }
}
