use std::time::{Duration, Instant};

use rand::rngs::ThreadRng;
use rand::Rng;

use crate::error::Result;
use crate::input::Command;
use crate::log;
use crate::render::Renderer;
use crate::state::{GameState, RunState, TickOutcome};
use crate::term::TermManager;
use crate::ticker::Ticker;

/// What the loop should do after handling an input.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Redraw,
    Quit,
}

/// Game state plus the timer that drives it. Knows nothing about the terminal.
pub struct Controller<R = ThreadRng> {
    state: GameState<R>,
    ticker: Ticker,
}

impl<R: Rng> Controller<R> {
    pub fn new(state: GameState<R>) -> Self {
        Controller { state, ticker: Ticker::new() }
    }

    pub fn state(&self) -> &GameState<R> {
        &self.state
    }

    pub fn ticker(&self) -> &Ticker {
        &self.ticker
    }

    pub fn handle(&mut self, cmd: Command, now: Instant) -> Flow {
        let changed = match cmd {
            Command::Quit => {
                log!("quit with score {}, high score {}", self.state.score(), self.state.high_score());
                return Flow::Quit;
            },
            Command::Turn(dir) => {
                self.state.set_direction(dir);
                false
            },
            Command::Action if self.state.run_state() == RunState::Idle => self.state.start(),
            Command::Action | Command::Pause => self.state.toggle_pause(),
        };

        if !changed {
            return Flow::Continue;
        }

        match self.state.run_state() {
            RunState::Running => log!("running, delay {}ms", self.state.tick_delay_ms()),
            RunState::Paused => log!("paused at score {}", self.state.score()),
            RunState::Idle => {},
        }

        self.sync_ticker(now);
        Flow::Redraw
    }

    /// Runs a tick if the timer is due.
    pub fn on_timer(&mut self, now: Instant) -> Option<TickOutcome> {
        if !self.ticker.fire(now) {
            return None;
        }

        let previous_high = self.state.high_score();
        let outcome = self.state.tick();

        match outcome {
            TickOutcome::Ate => {
                log!("ate food, score {}, delay {}ms", self.state.score(), self.state.tick_delay_ms());
            },
            TickOutcome::Crashed { score } => {
                log!("game over, score {}", score);
                if self.state.high_score() > previous_high {
                    log!("new high score {}", self.state.high_score());
                }
            },
            TickOutcome::Moved | TickOutcome::Skipped => {},
        }

        self.sync_ticker(now);
        Some(outcome)
    }

    /// How long the loop may wait for input. `None` means until a key arrives.
    pub fn wait_time(&self, now: Instant) -> Option<Duration> {
        self.ticker.time_until(now)
    }

    fn sync_ticker(&mut self, now: Instant) {
        let running = self.state.run_state() == RunState::Running;
        let delay = Duration::from_millis(self.state.tick_delay_ms());
        self.ticker.sync(running, delay, now);
    }
}

pub struct SnakeGame<R = ThreadRng> {
    controller: Controller<R>,
    renderer: Renderer,
}

impl<R: Rng> SnakeGame<R> {
    pub fn new(state: GameState<R>) -> Result<Self> {
        let renderer = Renderer::new(TermManager::new()?)?;
        Ok(SnakeGame { controller: Controller::new(state), renderer })
    }

    /// Takes over the terminal until the player quits. The terminal is restored on every exit path.
    pub fn run(&mut self) -> Result<()> {
        with_restore(
            self,
            |game| game.renderer.term_mut().setup(),
            |game| game.main_loop(),
            |game| game.renderer.term_mut().restore(),
        )
    }

    ///////////////////////////////////////////////////////////////////////////

    fn main_loop(&mut self) -> Result<()> {
        self.renderer.draw_frame()?;
        self.redraw()?;
        log!("ready");

        loop {
            let key_ev = match self.controller.wait_time(Instant::now()) {
                Some(wait) => self.renderer.term().read_key_timeout(wait)?,
                None => Some(self.renderer.term().read_key_blocking()?),
            };

            if let Some(cmd) = key_ev.as_ref().and_then(Command::from_key_event) {
                match self.controller.handle(cmd, Instant::now()) {
                    Flow::Quit => return Ok(()),
                    Flow::Redraw => self.redraw()?,
                    Flow::Continue => {},
                }
            }

            if self.controller.on_timer(Instant::now()).is_some() {
                self.redraw()?;
            }
        }
    }

    fn redraw(&mut self) -> Result<()> {
        let snapshot = self.controller.state().snapshot();
        self.renderer.render(&snapshot)
    }
}

/// Runs `body` after `setup`. `restore` always runs, also when `setup` failed halfway.
fn with_restore<T>(
    target: &mut T,
    setup: impl FnOnce(&mut T) -> Result<()>,
    body: impl FnOnce(&mut T) -> Result<()>,
    restore: impl FnOnce(&mut T) -> Result<()>,
) -> Result<()> {
    let res = setup(target).and_then(|()| body(target));
    let restored = restore(target);
    res.and(restored)
}
