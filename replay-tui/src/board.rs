use gomoku_replay::ReplayState;
use gomoku_types::{BoardSnapshot, Cell, Pos, BOARD_SIZE};
use ratatui::{
    style::Color,
    symbols::Marker,
    widgets::{
        canvas::{Canvas, Circle, Line, Rectangle},
        Block, Widget,
    },
};
use smallvec::SmallVec;

const BOARD_COLOR: Color = Color::Rgb(224, 192, 144);
const GRID_COLOR: Color = Color::Rgb(96, 72, 40);
const STONE_RADIUS: f64 = 0.4;
// Room for the coordinate labels around the grid.
const MARGIN: f64 = 1.5;

pub struct BoardView {
    board: BoardSnapshot,
    last_placed: SmallVec<Pos, 4>,
    title: String,
}

impl Default for BoardView {
    fn default() -> Self {
        Self {
            board: BoardSnapshot::EMPTY,
            last_placed: SmallVec::new(),
            title: "Board".to_owned(),
        }
    }
}

impl BoardView {
    pub fn on_state_change(&mut self, state: &ReplayState) {
        let Some(active) = state.active() else {
            *self = Self::default();
            return;
        };
        self.board = active.board.clone();
        self.last_placed = match state.previous() {
            Some(previous) => active.board.placed_since(&previous.board),
            None => SmallVec::new(),
        };
        self.title = if active.descriptor.is_empty() {
            "Board".to_owned()
        } else {
            active.descriptor.clone()
        };
    }

    pub fn draw(&self) -> impl Widget + '_ {
        let last = (BOARD_SIZE - 1) as f64;
        Canvas::default()
            .block(Block::bordered().title(self.title.as_str()))
            .background_color(BOARD_COLOR)
            .marker(Marker::Braille)
            .paint(move |ctx| {
                for i in 0..BOARD_SIZE {
                    let at = i as f64;
                    ctx.draw(&Line::new(0.0, at, last, at, GRID_COLOR));
                    ctx.draw(&Line::new(at, 0.0, at, last, GRID_COLOR));
                }
                ctx.layer();
                for (pos, cell) in self.board.stones() {
                    let (x, y) = canvas_point(pos);
                    ctx.draw(&Circle {
                        x,
                        y,
                        radius: STONE_RADIUS,
                        color: stone_color(cell),
                    });
                }
                for pos in &self.last_placed {
                    let (x, y) = canvas_point(*pos);
                    ctx.draw(&Rectangle {
                        x: x - STONE_RADIUS,
                        y: y - STONE_RADIUS,
                        width: 2.0 * STONE_RADIUS,
                        height: 2.0 * STONE_RADIUS,
                        color: Color::Yellow,
                    });
                }
                for i in 0..BOARD_SIZE {
                    let at = i as f64;
                    ctx.print(at, last + 1.0, i.to_string());
                    ctx.print(-1.2, last - at, i.to_string());
                }
            })
            .x_bounds([-MARGIN, last + MARGIN])
            .y_bounds([-MARGIN, last + MARGIN])
    }
}

/// Row 0 is the first log line, drawn at the top.
fn canvas_point(pos: Pos) -> (f64, f64) {
    let last = (BOARD_SIZE - 1) as f64;
    (f64::from(pos.col), last - f64::from(pos.row))
}

fn stone_color(cell: Cell) -> Color {
    match cell {
        Cell::Black => Color::Black,
        Cell::White => Color::White,
        Cell::Empty => BOARD_COLOR,
    }
}
