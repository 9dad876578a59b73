use std::path::Path;

use gomoku_types::BoardSnapshot;
use serde::{Deserialize, Serialize};

use crate::{
    error::{ReplayError, Result},
    scanner::Candidate,
};

/// One move of the reconstructed game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// Position in the history, starting at 0.
    pub seq: usize,
    /// Header text, joined with the player line when there is one.
    pub descriptor: String,
    pub move_number: Option<u32>,
    pub board: BoardSnapshot,
}

impl MoveRecord {
    #[must_use]
    pub fn from_candidate(seq: usize, candidate: Candidate) -> Self {
        Self {
            seq,
            descriptor: candidate.descriptor,
            move_number: candidate.move_number,
            board: candidate.board,
        }
    }
}

/// Moves in the order they were played.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct History {
    moves: Vec<MoveRecord>,
}

impl History {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_moves(moves: Vec<MoveRecord>) -> Self {
        Self { moves }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&MoveRecord> {
        self.moves.get(index)
    }

    #[must_use]
    pub fn last(&self) -> Option<&MoveRecord> {
        self.moves.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MoveRecord> {
        self.moves.iter()
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let text = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?;
        std::fs::write(path, text).map_err(|e| ReplayError::io(path, e))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| ReplayError::io(path, e))?;
        ron::from_str(&text).map_err(|source| ReplayError::Import {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl FromIterator<Candidate> for History {
    fn from_iter<T: IntoIterator<Item = Candidate>>(iter: T) -> Self {
        Self {
            moves: iter
                .into_iter()
                .enumerate()
                .map(|(seq, candidate)| MoveRecord::from_candidate(seq, candidate))
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a MoveRecord;
    type IntoIter = std::slice::Iter<'a, MoveRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
