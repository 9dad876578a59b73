//! Held replay state and the rules for accepting a new scan into it.

use gomoku_types::BoardSnapshot;
use tracing::info;

use crate::{
    gate::ScanCursor,
    history::{History, MoveRecord},
    scanner::Candidate,
};

/// Where the viewer currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Nothing reconstructed yet.
    Empty,
    /// Tracking the last move as new moves arrive.
    Following,
    /// Pinned to a move picked by the user.
    Browsing,
}

/// Everything one replay session holds between polls. The caller owns it
/// and hands it to [`Pipeline::tick`](crate::pipeline::Pipeline::tick).
#[derive(Debug, Clone)]
pub struct ReplayState {
    history: History,
    active: Option<usize>,
    follow_live: bool,
    pub(crate) cursor: ScanCursor,
}

impl Default for ReplayState {
    fn default() -> Self {
        Self::new(true)
    }
}

impl ReplayState {
    #[must_use]
    pub fn new(follow_live: bool) -> Self {
        Self {
            history: History::new(),
            active: None,
            follow_live,
            cursor: ScanCursor::NEVER,
        }
    }

    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Board of the most recent move.
    #[must_use]
    pub fn current_board(&self) -> Option<&BoardSnapshot> {
        self.history.last().map(|m| &m.board)
    }

    #[must_use]
    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    #[must_use]
    pub fn active(&self) -> Option<&MoveRecord> {
        self.history.get(self.active?)
    }

    /// The move before the active one, if any.
    #[must_use]
    pub fn previous(&self) -> Option<&MoveRecord> {
        self.history.get(self.active?.checked_sub(1)?)
    }

    #[must_use]
    pub fn cursor(&self) -> ScanCursor {
        self.cursor
    }

    /// Pins the view to `index`, clamped into the history.
    /// Does nothing on an empty history.
    pub fn set_active_index(&mut self, index: usize) {
        if self.history.is_empty() {
            return;
        }
        self.follow_live = false;
        self.active = Some(index.min(self.history.len() - 1));
    }

    /// Moves the view by `delta`. Stepping back stops following; stepping
    /// forward keeps the current mode. With nothing selected yet, stepping
    /// forward selects the first move and stepping back does nothing.
    pub fn step(&mut self, delta: isize) {
        if self.history.is_empty() {
            return;
        }
        let last = self.history.len() - 1;
        let Some(current) = self.active else {
            if delta > 0 {
                self.active = Some(0);
            }
            return;
        };
        let target = current.saturating_add_signed(delta).min(last);
        if delta < 0 {
            self.follow_live = false;
        }
        self.active = Some(target);
    }

    #[must_use]
    pub fn follow_live(&self) -> bool {
        self.follow_live
    }

    /// Turning follow-live on jumps to the last move.
    pub fn set_follow_live(&mut self, follow: bool) {
        self.follow_live = follow;
        if follow && !self.history.is_empty() {
            self.active = Some(self.history.len() - 1);
        }
    }

    #[must_use]
    pub fn view(&self) -> View {
        if self.history.is_empty() {
            View::Empty
        } else if self.follow_live {
            View::Following
        } else {
            View::Browsing
        }
    }

    /// Forgets everything reconstructed so far. The log itself is untouched
    /// and the next tick reads it again from the start.
    pub fn reset(&mut self) {
        self.history = History::new();
        self.active = None;
        self.cursor.clear();
        info!("replay state reset");
    }

    /// Accepts a full-scan candidate only if it is longer than what is
    /// held. Returns the number of moves added.
    pub(crate) fn accept_full(&mut self, candidate: History) -> Option<usize> {
        if candidate.len() <= self.history.len() {
            return None;
        }
        let added = candidate.len() - self.history.len();
        self.history = candidate;
        if self.follow_live {
            self.active = Some(self.history.len() - 1);
        }
        Some(added)
    }

    /// Replaces the single tracked move. Returns false when it is the same
    /// move that is already held.
    pub(crate) fn accept_latest(&mut self, candidate: Candidate) -> bool {
        let record = MoveRecord::from_candidate(0, candidate);
        if self.history.len() == 1 && self.history.last() == Some(&record) {
            return false;
        }
        self.history = History::from_moves(vec![record]);
        self.active = Some(0);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::{tests::move_lines, Direction, Scanner};

    fn history_of(count: u32) -> History {
        let lines: Vec<String> = (1..=count)
            .flat_map(|n| move_lines(n, (n % 2 + 1) as u8, &[]))
            .collect();
        let history: History = Scanner::default()
            .records(&lines, Direction::Forward)
            .collect();
        assert_eq!(history.len(), count as usize);
        history
    }

    #[test]
    fn follows_new_moves() {
        let mut state = ReplayState::new(true);
        assert_eq!(state.view(), View::Empty);
        assert_eq!(state.accept_full(history_of(1)), Some(1));
        assert_eq!(state.active_index(), Some(0));
        assert_eq!(state.accept_full(history_of(3)), Some(2));
        assert_eq!(state.active_index(), Some(2));
        assert_eq!(state.view(), View::Following);
    }

    #[test]
    fn never_shrinks() {
        let mut state = ReplayState::new(true);
        state.accept_full(history_of(3));
        assert_eq!(state.accept_full(history_of(2)), None);
        assert_eq!(state.accept_full(history_of(3)), None);
        assert_eq!(state.history().len(), 3);
    }

    #[test]
    fn browsing_stays_pinned() {
        let mut state = ReplayState::new(false);
        state.accept_full(history_of(3));
        assert_eq!(state.active_index(), None);
        state.set_active_index(1);
        assert_eq!(state.view(), View::Browsing);
        state.accept_full(history_of(4));
        assert_eq!(state.active_index(), Some(1));
        assert_eq!(state.history().len(), 4);
    }

    #[test]
    fn set_active_index_clamps() {
        let mut state = ReplayState::new(true);
        state.set_active_index(5);
        assert_eq!(state.active_index(), None);
        assert!(state.follow_live());

        state.accept_full(history_of(3));
        state.set_active_index(99);
        assert_eq!(state.active_index(), Some(2));
        assert!(!state.follow_live());
    }

    #[test]
    fn stepping() {
        let mut state = ReplayState::new(true);
        state.accept_full(history_of(3));
        state.step(1);
        assert_eq!(state.active_index(), Some(2));
        assert!(state.follow_live());
        state.step(-5);
        assert_eq!(state.active_index(), Some(0));
        assert_eq!(state.view(), View::Browsing);
        state.step(1);
        assert_eq!(state.active_index(), Some(1));
        assert_eq!(state.previous().unwrap().seq, 0);
        state.set_follow_live(true);
        assert_eq!(state.active_index(), Some(2));
        assert_eq!(state.view(), View::Following);
    }

    #[test]
    fn stepping_from_no_selection() {
        let mut state = ReplayState::new(false);
        state.accept_full(history_of(3));
        assert_eq!(state.active_index(), None);
        state.step(-1);
        assert_eq!(state.active_index(), None);
        state.step(1);
        assert_eq!(state.active_index(), Some(0));
        assert!(!state.follow_live());
    }

    #[test]
    fn latest_replaces_single_move() {
        let scanner = Scanner::default();
        let mut lines = move_lines(1, 1, &[(0, 0, 'O')]);
        let first = scanner.latest(&lines).unwrap();
        let mut state = ReplayState::new(true);
        assert!(state.accept_latest(first.clone()));
        assert!(!state.accept_latest(first));

        lines.extend(move_lines(2, 2, &[(0, 0, 'O'), (0, 1, 'X')]));
        let second = scanner.latest(&lines).unwrap();
        assert!(state.accept_latest(second.clone()));
        assert_eq!(state.history().len(), 1);
        assert_eq!(state.active().unwrap().seq, 0);
        assert_eq!(state.active().unwrap().move_number, Some(2));
        assert_eq!(state.current_board(), Some(&second.board));
    }

    #[test]
    fn reset_clears() {
        let mut state = ReplayState::new(false);
        state.accept_full(history_of(2));
        state.set_active_index(1);
        state.reset();
        assert!(state.history().is_empty());
        assert_eq!(state.active_index(), None);
        assert_eq!(state.cursor(), ScanCursor::NEVER);
        assert_eq!(state.view(), View::Empty);
    }
}
