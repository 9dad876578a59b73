use std::fmt::Display;

use serde::{Deserialize, Serialize};

pub const BOARD_SIZE: usize = 20;
pub const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// A board coordinate. `row` is the line offset inside a board block,
/// `col` the character offset inside that line.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash, Serialize, Deserialize,
)]
pub struct Pos {
    pub row: u8,
    pub col: u8,
}

impl Pos {
    #[must_use]
    #[inline(always)]
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    #[must_use]
    #[inline(always)]
    pub const fn index(self) -> usize {
        self.row as usize * BOARD_SIZE + self.col as usize
    }

    // NOTE Only valid for indices below CELL_COUNT, which always fit into u8 rows and cols
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn from_index(index: usize) -> Self {
        Self {
            row: (index / BOARD_SIZE) as u8,
            col: (index % BOARD_SIZE) as u8,
        }
    }

    pub fn all() -> impl Iterator<Item = Pos> {
        (0..CELL_COUNT).map(Pos::from_index)
    }
}

impl Display for Pos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.col, self.row)
    }
}
