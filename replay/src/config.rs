use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ReplayError, Result};

/// Which reconstruction strategy the pipeline runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Mode {
    /// Rescan the whole log and keep every move.
    #[default]
    Full,
    /// Only track the most recent board of the log.
    Latest,
}

/// Knobs of the record scanner. The windows are heuristics: a log with a
/// bigger gap between a header and its board needs larger values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Lines after a header (header included) searched for the first board row.
    pub lookahead: usize,
    /// Lines before a board searched for its header when scanning backwards.
    pub lookbehind: usize,
    pub header_token: String,
    pub player_token: String,
    pub separator: String,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            lookahead: 10,
            lookbehind: 30,
            header_token: "Move".to_owned(),
            player_token: "Player".to_owned(),
            separator: " - ".to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplayConfig {
    pub mode: Mode,
    pub poll_interval_ms: u64,
    pub follow_live: bool,
    pub export_path: PathBuf,
    pub scan: ScanConfig,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            mode: Mode::Full,
            poll_interval_ms: 500,
            follow_live: true,
            export_path: PathBuf::from("history.ron"),
            scan: ScanConfig::default(),
        }
    }
}

impl ReplayConfig {
    /// Reads a RON config file. Missing fields keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| ReplayError::io(path, e))?;
        Self::from_ron(&text).map_err(|source| ReplayError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_ron(text: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(text)
    }
}
