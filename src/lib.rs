pub mod error;
pub mod game;
pub mod input;
pub mod logger;
pub mod render;
pub mod snake;
pub mod snapshot;
pub mod state;
pub mod term;
pub mod ticker;

pub type TermInt = u16;
pub type Coords = (u16, u16);

pub use error::{GameError, Result};
pub use snake::{Direction, Snake};
pub use snapshot::{Instruction, Segment, Snapshot};
pub use state::{GameState, RunState, TickOutcome};
