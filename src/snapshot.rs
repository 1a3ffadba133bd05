//! Read-only view of the game handed to the renderer after every change.

use crate::Coords;
use crate::snake::Direction;
use crate::state::RunState;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Segment {
    pub pos: Coords,
    pub is_head: bool,
}

/// Which hint the player should see.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Instruction {
    Start,
    Resume,
}

impl Instruction {
    pub fn text(self) -> &'static str {
        match self {
            Instruction::Start => "Press spacebar to start the game",
            Instruction::Resume => "Press spacebar to resume",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    /// Head first.
    pub segments: Vec<Segment>,
    pub direction: Direction,
    /// Hidden until the game has been started.
    pub food: Option<Coords>,
    pub score: u32,
    pub high_score: u32,
    /// The high score only appears once a run has ended.
    pub show_high_score: bool,
    pub run_state: RunState,
    pub instruction: Option<Instruction>,
}

impl Snapshot {
    pub fn head(&self) -> Option<Coords> {
        self.segments.first().map(|s| s.pos)
    }
}

/// Zero-padded three digit score, as shown on the board.
pub fn format_score(score: u32) -> String {
    format!("{:03}", score)
}
