//! Draws snapshots onto the terminal: a header line with the scores, a framed
//! 20x20 board, and a message box for instructions.

use crate::{Coords, TermInt};
use crate::error::{GameError, Result};
use crate::snapshot::{format_score, Instruction, Snapshot};
use crate::state::GRID_SIZE;
use crate::term::TermManager;

/// Terminal columns per grid cell; terminal characters are about twice as tall as wide.
pub const CELL_WIDTH: TermInt = 2;

const SNAKE_BODY_CHAR: char = '█';
const FOOD_CELL: [char; 2] = ['(', ')'];
const EMPTY_CELL: [char; 2] = [' ', ' '];

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BoardLayout {
    origin: Coords,
}

impl BoardLayout {
    /// Board frame plus borders.
    pub const WIDTH: TermInt = GRID_SIZE * CELL_WIDTH + 2;
    /// Header line, then the framed board.
    pub const HEIGHT: TermInt = GRID_SIZE + 3;

    /// Centers the board in a terminal of the given size.
    pub fn fit(term_size: Coords) -> Result<Self> {
        let (width, height) = term_size;
        if width < Self::WIDTH || height < Self::HEIGHT {
            return Err(GameError::TerminalTooSmall {
                width,
                height,
                min_width: Self::WIDTH,
                min_height: Self::HEIGHT,
            });
        }

        let origin = ((width - Self::WIDTH) / 2, (height - Self::HEIGHT) / 2);
        Ok(BoardLayout { origin })
    }

    pub fn header(&self) -> Coords {
        self.origin
    }

    pub fn frame_top_left(&self) -> Coords {
        (self.origin.0, self.origin.1 + 1)
    }

    pub fn frame_size(&self) -> Coords {
        (Self::WIDTH, GRID_SIZE + 2)
    }

    /// Terminal position of the left column of a grid cell.
    pub fn cell(&self, pos: Coords) -> Coords {
        let (fx, fy) = self.frame_top_left();
        (fx + 1 + pos.0 * CELL_WIDTH, fy + 1 + pos.1)
    }
}

pub struct Renderer {
    term: TermManager,
    layout: BoardLayout,
}

impl Renderer {
    pub fn new(term: TermManager) -> Result<Self> {
        let layout = BoardLayout::fit(term.get_terminal_size())?;
        Ok(Renderer { term, layout })
    }

    pub fn term(&self) -> &TermManager {
        &self.term
    }

    pub fn term_mut(&mut self) -> &mut TermManager {
        &mut self.term
    }

    /// Clears the screen and draws the static frame.
    pub fn draw_frame(&mut self) -> Result<()> {
        self.term.clear()?;
        self.term.draw_box(self.layout.frame_top_left(), self.layout.frame_size())
    }

    pub fn render(&mut self, snapshot: &Snapshot) -> Result<()> {
        self.term.hide_message()?;
        self.draw_header(snapshot)?;
        self.draw_cells(snapshot)?;

        match snapshot.instruction {
            Some(instruction) => self.term.show_message(&instruction_lines(instruction)),
            None => self.term.flush(),
        }
    }

    ///////////////////////////////////////////////////////////////////////////

    fn draw_header(&mut self, snapshot: &Snapshot) -> Result<()> {
        let width = BoardLayout::WIDTH as usize;
        let left = format!("SCORE {}", format_score(snapshot.score));
        let right = if snapshot.show_high_score {
            format!("HIGH {}", format_score(snapshot.high_score))
        } else {
            String::new()
        };

        let line = format!(" {:<w$}{} ", left, right, w = width.saturating_sub(right.len() + 2));
        self.term.print_str_at(self.layout.header(), &line)
    }

    fn draw_cells(&mut self, snapshot: &Snapshot) -> Result<()> {
        let size = GRID_SIZE as usize;
        let mut cells = vec![EMPTY_CELL; size * size];
        let idx = |(x, y): Coords| y as usize * size + x as usize;

        // Food first so the snake covers it when it spawns underneath
        if let Some(food) = snapshot.food {
            cells[idx(food)] = FOOD_CELL;
        }

        let head_char = snapshot.direction.head_char();
        for segment in snapshot.segments.iter().rev() {
            cells[idx(segment.pos)] = if segment.is_head {
                [head_char, head_char]
            } else {
                [SNAKE_BODY_CHAR, SNAKE_BODY_CHAR]
            };
        }

        for y in 0..GRID_SIZE {
            for x in 0..GRID_SIZE {
                let (tx, ty) = self.layout.cell((x, y));
                let [left, right] = cells[idx((x, y))];
                self.term.print_at((tx, ty), left)?;
                self.term.print_at((tx + 1, ty), right)?;
            }
        }

        Ok(())
    }
}

pub fn instruction_lines(instruction: Instruction) -> Vec<&'static str> {
    match instruction {
        Instruction::Start => vec![
            "S N A K E",
            "",
            instruction.text(),
            "Arrow keys or WASD to move",
            "Esc to pause, Q to quit",
        ],
        Instruction::Resume => vec![
            "Paused",
            "",
            instruction.text(),
            "or Q to quit",
        ],
    }
}
