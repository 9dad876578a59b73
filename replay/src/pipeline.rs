//! One poll of the replay: gate, scan, validate, accept.

use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use tracing::{debug, info, warn};

use crate::{
    config::{Mode, ReplayConfig},
    error::ReplayError,
    gate::{self, Freshness},
    scanner::{Direction, Scanner},
    source,
    state::ReplayState,
};

/// Why a tick left the held state alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Skip {
    /// The log does not exist (yet).
    Missing,
    /// The log has not changed since the last successful scan.
    Unchanged,
    /// The log was scanned but held nothing newer.
    NoNewData,
}

#[derive(Debug)]
pub enum Tick {
    NoUpdate(Skip),
    Applied { total: usize, added: usize },
    /// Reading failed this cycle. The held state is untouched and the next
    /// tick tries again.
    TransientFailure(ReplayError),
}

impl Tick {
    #[must_use]
    pub fn is_applied(&self) -> bool {
        matches!(self, Tick::Applied { .. })
    }
}

#[derive(Debug, Clone)]
pub struct Pipeline {
    path: PathBuf,
    config: ReplayConfig,
    scanner: Scanner,
}

impl Pipeline {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, config: ReplayConfig) -> Self {
        let scanner = Scanner::new(config.scan.clone());
        Self {
            path: path.into(),
            config,
            scanner,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn config(&self) -> &ReplayConfig {
        &self.config
    }

    /// Fresh state using the configured follow-live default.
    #[must_use]
    pub fn new_state(&self) -> ReplayState {
        ReplayState::new(self.config.follow_live)
    }

    pub fn tick(&self, state: &mut ReplayState) -> Tick {
        let stamp = match gate::check(&self.path, &state.cursor) {
            Freshness::Missing => {
                debug!(path = %self.path.display(), "log missing");
                return Tick::NoUpdate(Skip::Missing);
            }
            Freshness::Unchanged => return Tick::NoUpdate(Skip::Unchanged),
            Freshness::Changed(stamp) => stamp,
        };

        let lines = match source::read_lines(&self.path) {
            Ok(lines) => lines,
            Err(ReplayError::Io { source, .. }) if source.kind() == ErrorKind::NotFound => {
                return Tick::NoUpdate(Skip::Missing);
            }
            Err(e) => {
                warn!(error = %e, "log read failed");
                return Tick::TransientFailure(e);
            }
        };

        let added = match self.config.mode {
            Mode::Full => {
                let candidate = self.scanner.records(&lines, Direction::Forward).collect();
                state.accept_full(candidate)
            }
            Mode::Latest => self
                .scanner
                .latest(&lines)
                .and_then(|candidate| state.accept_latest(candidate).then_some(1)),
        };
        if let Some(stamp) = stamp {
            state.cursor.record(stamp);
        }

        match added {
            Some(added) => {
                let total = state.history().len();
                info!(total, added, "history updated");
                Tick::Applied { total, added }
            }
            None => {
                debug!(lines = lines.len(), "no new moves");
                Tick::NoUpdate(Skip::NoNewData)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::ScanCursor;

    fn write_board(path: &Path, header: &str, stones: &[(usize, usize, char)]) {
        let mut rows = vec![vec!['-'; 20]; 20];
        for &(row, col, symbol) in stones {
            rows[row][col] = symbol;
        }
        let mut text = format!("{header}\n");
        for row in rows {
            text.extend(row);
            text.push('\n');
        }
        std::fs::write(path, text).unwrap();
    }

    #[test]
    fn latest_mode_tick() {
        let dir = tempfile::tempdir().unwrap();
        let config = ReplayConfig {
            mode: Mode::Latest,
            ..ReplayConfig::default()
        };
        let pipeline = Pipeline::new(dir.path().join("board.log"), config);
        let mut state = pipeline.new_state();

        write_board(pipeline.path(), "Move 1", &[(0, 0, 'O')]);
        assert!(matches!(
            pipeline.tick(&mut state),
            Tick::Applied { total: 1, added: 1 }
        ));
        assert_eq!(state.active().unwrap().move_number, Some(1));

        // Same content again after a rewrite: nothing new.
        write_board(pipeline.path(), "Move 1 ", &[(0, 0, 'O')]);
        assert!(matches!(
            pipeline.tick(&mut state),
            Tick::NoUpdate(Skip::NoNewData)
        ));

        write_board(pipeline.path(), "Move 2", &[(0, 0, 'O'), (1, 0, 'X')]);
        assert!(pipeline.tick(&mut state).is_applied());
        assert_eq!(state.history().len(), 1);
        assert_eq!(state.active().unwrap().move_number, Some(2));
    }

    #[cfg(unix)]
    #[test]
    fn unstatable_log_keeps_cursor() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("board.log");
        std::os::unix::fs::symlink(&path, &path).unwrap();
        let pipeline = Pipeline::new(&path, ReplayConfig::default());
        let mut state = pipeline.new_state();

        assert!(matches!(
            pipeline.tick(&mut state),
            Tick::TransientFailure(_)
        ));
        assert_eq!(state.cursor(), ScanCursor::NEVER);
        assert!(state.history().is_empty());
    }
}
