use std::fmt::Display;

use enum_map::EnumMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::{cell::Cell, pos::Pos, BOARD_SIZE};

/// The full 20x20 board after some move, exactly as it was recorded.
///
/// A snapshot can only be built from a complete grid, so a value of this
/// type never holds a partial row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardSnapshot {
    rows: [[Cell; BOARD_SIZE]; BOARD_SIZE],
}

impl Default for BoardSnapshot {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl BoardSnapshot {
    pub const EMPTY: Self = Self {
        rows: [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE],
    };

    #[must_use]
    pub const fn from_rows(rows: [[Cell; BOARD_SIZE]; BOARD_SIZE]) -> Self {
        Self { rows }
    }

    #[must_use]
    #[inline(always)]
    pub fn get(&self, pos: Pos) -> Cell {
        self.rows[pos.row as usize][pos.col as usize]
    }

    pub fn set(&mut self, pos: Pos, cell: Cell) {
        self.rows[pos.row as usize][pos.col as usize] = cell;
    }

    /// Occupied positions in row-major order.
    pub fn stones(&self) -> impl Iterator<Item = (Pos, Cell)> + '_ {
        Pos::all()
            .map(|pos| (pos, self.get(pos)))
            .filter(|(_, cell)| cell.is_stone())
    }

    #[must_use]
    pub fn counts(&self) -> EnumMap<Cell, usize> {
        let mut counts = EnumMap::default();
        for row in &self.rows {
            for cell in row {
                counts[*cell] += 1;
            }
        }
        counts
    }

    /// Positions holding a stone here that were empty in `previous`.
    /// Usually a single entry: the move that produced this snapshot.
    #[must_use]
    pub fn placed_since(&self, previous: &BoardSnapshot) -> SmallVec<Pos, 4> {
        self.stones()
            .filter(|(pos, _)| !previous.get(*pos).is_stone())
            .map(|(pos, _)| pos)
            .collect()
    }
}

impl Display for BoardSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in &self.rows {
            for cell in row {
                write!(f, "{}", cell.symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
