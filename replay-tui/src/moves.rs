use gomoku_replay::ReplayState;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, List, ListState},
    Frame,
};

#[derive(Default)]
pub struct MoveList {
    moves: Vec<String>,
    list_state: ListState,
}

impl MoveList {
    pub fn on_state_change(&mut self, state: &ReplayState) {
        self.moves = state
            .history()
            .iter()
            .map(|m| {
                if m.descriptor.is_empty() {
                    format!("#{}", m.seq + 1)
                } else {
                    format!("#{} {}", m.seq + 1, m.descriptor)
                }
            })
            .collect();
        self.list_state.select(state.active_index());
    }

    pub fn draw(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::new()
            .borders(Borders::ALL)
            .title(Line::raw("Moves").left_aligned());
        let list = List::new(self.moves.iter().map(String::as_str))
            .block(block)
            .highlight_style(Style::new().add_modifier(Modifier::BOLD))
            .highlight_symbol(">");
        frame.render_stateful_widget(list, area, &mut self.list_state);
    }
}
