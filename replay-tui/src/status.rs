use gomoku_replay::{ReplayState, View};
use ratatui::{
    text::{Line, Text},
    widgets::{Block, Paragraph, Widget, Wrap},
};

const KEYS: &str = "←/→ step  Home/End  f live  r reset  s save  q quit";

pub struct StatusView {
    message: String,
}

impl StatusView {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = message.into();
    }

    pub fn draw(&self, state: &ReplayState) -> impl Widget + '_ {
        let total = state.history().len();
        let current = state.active_index().map_or(0, |i| i + 1);
        let mode = match state.view() {
            View::Empty => "waiting",
            View::Following => "live",
            View::Browsing => "browsing",
        };
        let descriptor = state
            .active()
            .map(|m| m.descriptor.clone())
            .unwrap_or_default();
        let text = Text::from(vec![
            Line::raw(descriptor),
            Line::raw(format!("{current} / {total}  [{mode}]")),
            Line::raw(self.message.clone()),
            Line::raw(KEYS),
        ]);
        Paragraph::new(text)
            .wrap(Wrap { trim: true })
            .block(Block::bordered().title("Status"))
    }
}
