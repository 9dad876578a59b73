//! Acceptance check for board blocks.
//!
//! The game engine may still be writing the last block when the log is
//! read, so anything that is not exactly a full grid is rejected here and
//! never reaches the history.

use gomoku_types::{BoardSnapshot, Cell, BOARD_SIZE};

/// Whether `line` is one board row: exactly `BOARD_SIZE` symbols from `-OX`.
#[must_use]
pub fn is_row(line: &str) -> bool {
    line.len() == BOARD_SIZE && line.bytes().all(|b| Cell::from_symbol(b).is_some())
}

/// Parses a candidate block into a snapshot, or `None` if it is not a
/// complete grid.
#[must_use]
pub fn validate_block<S: AsRef<str>>(rows: &[S]) -> Option<BoardSnapshot> {
    if rows.len() != BOARD_SIZE {
        return None;
    }
    let mut grid = [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE];
    for (cells, line) in grid.iter_mut().zip(rows) {
        let line = line.as_ref().as_bytes();
        if line.len() != BOARD_SIZE {
            return None;
        }
        for (cell, symbol) in cells.iter_mut().zip(line) {
            *cell = Cell::from_symbol(*symbol)?;
        }
    }
    Some(BoardSnapshot::from_rows(grid))
}

#[cfg(test)]
mod tests {
    use super::*;
    use gomoku_types::Pos;

    fn empty_rows() -> Vec<String> {
        vec!["-".repeat(BOARD_SIZE); BOARD_SIZE]
    }

    #[test]
    fn rows() {
        assert!(is_row("--------------------"));
        assert!(is_row("O-X-----------------"));
        assert!(!is_row("-------------------"));
        assert!(!is_row("---------------------"));
        assert!(!is_row("---------o----------"));
        assert!(!is_row("Move 1--------------"));
    }

    #[test]
    fn accepts_full_grid() {
        let mut rows = empty_rows();
        rows[3].replace_range(4..5, "O");
        rows[19].replace_range(0..1, "X");
        let board = validate_block(&rows).unwrap();
        assert_eq!(board.get(Pos::new(3, 4)), Cell::Black);
        assert_eq!(board.get(Pos::new(19, 0)), Cell::White);
        assert_eq!(board.stones().count(), 2);
    }

    #[test]
    fn rejects_partial_last_row() {
        let mut rows = empty_rows();
        rows[19].truncate(7);
        assert_eq!(validate_block(&rows), None);
    }

    #[test]
    fn rejects_foreign_symbol() {
        let mut rows = empty_rows();
        rows[10].replace_range(10..11, "#");
        assert_eq!(validate_block(&rows), None);
    }

    #[test]
    fn rejects_short_block() {
        let rows = empty_rows();
        assert_eq!(validate_block(&rows[..19]), None);
    }
}
