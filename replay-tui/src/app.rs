use std::{
    io,
    time::{Duration, Instant},
};

use gomoku_replay::{Pipeline, ReplayState, Skip, Tick};
use ratatui::{
    crossterm::event::{self, Event, KeyCode},
    layout::{Constraint, Layout},
    DefaultTerminal, Frame,
};
use tracing::{info, warn};

use crate::{board::BoardView, moves::MoveList, status::StatusView};

pub enum Message {
    Quit,
    Step(isize),
    First,
    GoLive,
    ToggleLive,
    Reset,
    Save,
}

pub struct App {
    pipeline: Pipeline,
    state: ReplayState,
    board_view: BoardView,
    move_list: MoveList,
    status: StatusView,
}

impl App {
    pub fn new(pipeline: Pipeline) -> Self {
        let state = pipeline.new_state();
        let status = StatusView::new(format!("Waiting for {}", pipeline.path().display()));
        Self {
            pipeline,
            state,
            board_view: BoardView::default(),
            move_list: MoveList::default(),
            status,
        }
    }

    pub fn run(mut self, mut terminal: DefaultTerminal) -> io::Result<()> {
        let interval = Duration::from_millis(self.pipeline.config().poll_interval_ms);
        let mut last_poll: Option<Instant> = None;
        loop {
            if last_poll.map_or(true, |at| at.elapsed() >= interval) {
                self.poll();
                last_poll = Some(Instant::now());
            }
            terminal.draw(|frame| self.draw(frame))?;
            if let Some(message) = self.update() {
                match message {
                    Message::Quit => break,
                    Message::Step(delta) => self.state.step(delta),
                    Message::First => self.state.set_active_index(0),
                    Message::GoLive => self.state.set_follow_live(true),
                    Message::ToggleLive => {
                        let follow = !self.state.follow_live();
                        self.state.set_follow_live(follow);
                    }
                    Message::Reset => {
                        self.state.reset();
                        self.status.set_message("History cleared");
                    }
                    Message::Save => self.save(),
                }
                self.on_state_change();
            }
        }
        Ok(())
    }

    fn poll(&mut self) {
        match self.pipeline.tick(&mut self.state) {
            Tick::Applied { total, .. } => {
                self.status.set_message(format!("{total} moves read"));
                self.on_state_change();
            }
            Tick::NoUpdate(Skip::Missing) => self
                .status
                .set_message(format!("Waiting for {}", self.pipeline.path().display())),
            Tick::NoUpdate(Skip::Unchanged | Skip::NoNewData) => {}
            Tick::TransientFailure(e) => self.status.set_message(format!("Read failed: {e}")),
        }
    }

    fn save(&mut self) {
        let path = &self.pipeline.config().export_path;
        match self.state.history().save(path) {
            Ok(()) => {
                info!(path = %path.display(), moves = self.state.history().len(), "history saved");
                self.status.set_message(format!("Saved to {}", path.display()));
            }
            Err(e) => {
                warn!(error = %e, "saving history failed");
                self.status.set_message(e.to_string());
            }
        }
    }

    pub fn update(&mut self) -> Option<Message> {
        if event::poll(Duration::from_millis(100)).ok()? {
            if let Event::Key(key_ev) = event::read().ok()? {
                return match key_ev.code {
                    KeyCode::Char('q') | KeyCode::Esc => Some(Message::Quit),
                    KeyCode::Left | KeyCode::Char('h') => Some(Message::Step(-1)),
                    KeyCode::Right | KeyCode::Char('l') => Some(Message::Step(1)),
                    KeyCode::PageUp => Some(Message::Step(-10)),
                    KeyCode::PageDown => Some(Message::Step(10)),
                    KeyCode::Home => Some(Message::First),
                    KeyCode::End => Some(Message::GoLive),
                    KeyCode::Char('f') => Some(Message::ToggleLive),
                    KeyCode::Char('r') => Some(Message::Reset),
                    KeyCode::Char('s') => Some(Message::Save),
                    _ => None,
                };
            }
        }
        None
    }

    fn on_state_change(&mut self) {
        self.board_view.on_state_change(&self.state);
        self.move_list.on_state_change(&self.state);
    }

    fn draw(&mut self, frame: &mut Frame) {
        let horizontal = Layout::horizontal([Constraint::Percentage(65), Constraint::Percentage(35)]);
        let vertical = Layout::vertical([Constraint::Min(5), Constraint::Length(7)]);
        let [board, right] = horizontal.areas(frame.area());
        let [moves, status] = vertical.areas(right);
        frame.render_widget(self.board_view.draw(), board);
        self.move_list.draw(frame, moves);
        frame.render_widget(self.status.draw(&self.state), status);
    }
}
