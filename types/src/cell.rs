use enum_map::Enum;
use serde::{Deserialize, Serialize};

pub const ALL_CELLS: [Cell; 3] = [Cell::Empty, Cell::Black, Cell::White];

/// State of one intersection as the engine writes it to the board log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Enum, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Black,
    White,
}

impl Cell {
    #[must_use]
    pub const fn from_symbol(symbol: u8) -> Option<Self> {
        match symbol {
            b'-' => Some(Cell::Empty),
            b'O' => Some(Cell::Black),
            b'X' => Some(Cell::White),
            _ => None,
        }
    }

    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Cell::Empty => '-',
            Cell::Black => 'O',
            Cell::White => 'X',
        }
    }

    #[must_use]
    pub const fn is_stone(self) -> bool {
        !matches!(self, Cell::Empty)
    }
}
