//! Locates board blocks and their descriptors in raw log lines.
//!
//! The log is a sequence of moves, each written as a header line
//! (`Move 12`), an optional player line, then the 20 board rows. A
//! [`Scanner`] walks those lines in either direction and yields every
//! block that passes [`validate_block`](crate::validate::validate_block).

use gomoku_types::{BoardSnapshot, BOARD_SIZE};

use crate::{
    config::ScanConfig,
    validate::{is_row, validate_block},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// From the first line, yielding blocks in log order.
    Forward,
    /// From the last line, yielding the most recent block first.
    Backward,
}

/// A validated block with the metadata found around it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub descriptor: String,
    pub move_number: Option<u32>,
    pub board: BoardSnapshot,
    /// Line index of the first board row.
    pub line: usize,
}

#[derive(Debug, Clone, Default)]
pub struct Scanner {
    config: ScanConfig,
}

impl Scanner {
    #[must_use]
    pub fn new(config: ScanConfig) -> Self {
        Self { config }
    }

    pub fn records<'a, S: AsRef<str>>(
        &'a self,
        lines: &'a [S],
        direction: Direction,
    ) -> Records<'a, S> {
        let cursor = match direction {
            Direction::Forward => 0,
            Direction::Backward => lines.len(),
        };
        Records {
            scanner: self,
            lines,
            direction,
            cursor,
        }
    }

    /// The most recent valid block of the log.
    #[must_use]
    pub fn latest<S: AsRef<str>>(&self, lines: &[S]) -> Option<Candidate> {
        self.records(lines, Direction::Backward).next()
    }

    fn is_header(&self, line: &str) -> bool {
        line.starts_with(self.config.header_token.as_str())
    }

    /// Header text, joined with the next line when that one names the player.
    /// The player line must come before `end`.
    fn describe<S: AsRef<str>>(
        &self,
        lines: &[S],
        header: usize,
        end: usize,
    ) -> (String, Option<u32>) {
        let header_line = lines[header].as_ref();
        let mut descriptor = header_line.to_owned();
        if let Some(player) = lines
            .get(header + 1)
            .filter(|_| header + 1 < end)
            .map(AsRef::<str>::as_ref)
            .filter(|l| l.contains(self.config.player_token.as_str()))
        {
            descriptor.push_str(&self.config.separator);
            descriptor.push_str(player);
        }
        let move_number = parse_move_number(&header_line[self.config.header_token.len()..]);
        (descriptor, move_number)
    }
}

/// First unsigned number in `text`, e.g. `12` for `" 12:"`.
fn parse_move_number(text: &str) -> Option<u32> {
    text.split(|c: char| !c.is_ascii_digit())
        .find(|s| !s.is_empty())?
        .parse()
        .ok()
}

/// Lazy sequence of validated blocks. Consumed lines are never revisited.
pub struct Records<'a, S> {
    scanner: &'a Scanner,
    lines: &'a [S],
    direction: Direction,
    cursor: usize,
}

impl<S: AsRef<str>> Records<'_, S> {
    fn block_at(&self, start: usize) -> Option<BoardSnapshot> {
        let rows = self.lines.get(start..start + BOARD_SIZE)?;
        validate_block(rows)
    }

    fn next_forward(&mut self) -> Option<Candidate> {
        let lines = self.lines;
        while self.cursor < lines.len() {
            let header = self.cursor;
            self.cursor += 1;
            if !self.scanner.is_header(lines[header].as_ref()) {
                continue;
            }
            let window_end = header
                .saturating_add(self.scanner.config.lookahead)
                .min(lines.len());
            let Some(start) = (header..window_end).find(|&k| is_row(lines[k].as_ref())) else {
                continue;
            };
            let Some(board) = self.block_at(start) else {
                continue;
            };
            self.cursor = start + BOARD_SIZE;
            let (descriptor, move_number) = self.scanner.describe(lines, header, start);
            return Some(Candidate {
                descriptor,
                move_number,
                board,
                line: start,
            });
        }
        None
    }

    fn next_backward(&mut self) -> Option<Candidate> {
        let lines = self.lines;
        loop {
            let last = lines[..self.cursor]
                .iter()
                .rposition(|l| is_row(l.as_ref()))?;
            self.cursor = last;
            let Some(start) = (last + 1).checked_sub(BOARD_SIZE) else {
                continue;
            };
            let Some(board) = self.block_at(start) else {
                continue;
            };
            self.cursor = start;
            let window_start = start.saturating_sub(self.scanner.config.lookbehind);
            let (descriptor, move_number) = (window_start..start)
                .rev()
                .find(|&k| self.scanner.is_header(lines[k].as_ref()))
                .map(|header| self.scanner.describe(lines, header, start))
                .unwrap_or_default();
            return Some(Candidate {
                descriptor,
                move_number,
                board,
                line: start,
            });
        }
    }
}

impl<S: AsRef<str>> Iterator for Records<'_, S> {
    type Item = Candidate;

    fn next(&mut self) -> Option<Self::Item> {
        match self.direction {
            Direction::Forward => self.next_forward(),
            Direction::Backward => self.next_backward(),
        }
    }
}
