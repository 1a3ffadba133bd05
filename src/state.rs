//! The game itself: snake, food, speed and score bookkeeping driven one tick at a time.

use rand::rngs::ThreadRng;
use rand::Rng;

use crate::{Coords, TermInt};
use crate::snake::{Direction, Snake};
use crate::snapshot::{Instruction, Segment, Snapshot};

pub const GRID_SIZE: TermInt = 20;
pub const START_POSITION: Coords = (10, 10);
pub const START_DIRECTION: Direction = Direction::Right;

pub const INITIAL_DELAY_MS: u64 = 200;
pub const SPEED_STEP_MS: u64 = 5;
pub const MIN_DELAY_MS: u64 = 25;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Running,
    Paused,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// The game was not running.
    Skipped,
    Moved,
    Ate,
    /// The snake ran into itself and the game was reset. Carries the final score.
    Crashed { score: u32 },
}

#[derive(Clone, Debug)]
pub struct GameState<R = ThreadRng> {
    snake: Snake,
    pending_direction: Option<Direction>,
    food: Coords,
    high_score: u32,
    runs_finished: u32,
    delay_ms: u64,
    run_state: RunState,
    rng: R,
}

impl GameState<ThreadRng> {
    pub fn new() -> Self {
        GameState::with_rng(rand::thread_rng())
    }
}

impl Default for GameState<ThreadRng> {
    fn default() -> Self {
        GameState::new()
    }
}

impl<R: Rng> GameState<R> {
    pub fn with_rng(rng: R) -> Self {
        let mut state = GameState {
            snake: Snake::new(START_POSITION, START_DIRECTION),
            pending_direction: None,
            food: START_POSITION,
            high_score: 0,
            runs_finished: 0,
            delay_ms: INITIAL_DELAY_MS,
            run_state: RunState::Idle,
            rng,
        };
        state.food = state.generate_food();
        state
    }

    /// One full tick: move, then check for a self-bite.
    pub fn tick(&mut self) -> TickOutcome {
        let outcome = self.advance_one_tick();
        if outcome == TickOutcome::Skipped {
            return outcome;
        }

        match self.check_collision() {
            Some(score) => TickOutcome::Crashed { score },
            None => outcome,
        }
    }

    pub fn advance_one_tick(&mut self) -> TickOutcome {
        if self.run_state != RunState::Running {
            return TickOutcome::Skipped;
        }

        if let Some(dir) = self.pending_direction.take() {
            self.snake.set_direction(dir);
        }

        let new_head = self.snake.next_head(GRID_SIZE);
        let ate = new_head == self.food;
        self.snake.advance(new_head, ate);

        if ate {
            self.food = self.generate_food();
            self.increase_speed();
            TickOutcome::Ate
        } else {
            TickOutcome::Moved
        }
    }

    /// Resets the game if the head overlaps the body. Returns the score of the finished run.
    pub fn check_collision(&mut self) -> Option<u32> {
        if !self.snake.bites_itself() {
            return None;
        }

        let score = self.score();
        self.reset();
        Some(score)
    }

    /// Queues a turn for the next tick. Reversals and turns outside a running game are ignored.
    pub fn set_direction(&mut self, requested: Direction) {
        if self.run_state != RunState::Running {
            return;
        }

        // Checked against the direction of the last move, not the last request
        if !requested.is_opposite(self.snake.direction()) {
            self.pending_direction = Some(requested);
        }
    }

    pub fn start(&mut self) -> bool {
        if self.run_state != RunState::Idle {
            return false;
        }

        self.run_state = RunState::Running;
        true
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.run_state = match self.run_state {
            RunState::Running => RunState::Paused,
            RunState::Paused => RunState::Running,
            RunState::Idle => return false,
        };
        true
    }

    /// Uniformly random cell. May land under the snake.
    pub fn generate_food(&mut self) -> Coords {
        (self.rng.gen_range(0..GRID_SIZE), self.rng.gen_range(0..GRID_SIZE))
    }

    pub fn increase_speed(&mut self) {
        if self.delay_ms > MIN_DELAY_MS {
            self.delay_ms = self.delay_ms.saturating_sub(SPEED_STEP_MS).max(MIN_DELAY_MS);
        }
    }

    pub fn reset(&mut self) {
        self.update_high_score();
        self.runs_finished += 1;

        self.snake = Snake::new(START_POSITION, START_DIRECTION);
        self.pending_direction = None;
        self.food = self.generate_food();
        self.delay_ms = INITIAL_DELAY_MS;
        self.run_state = RunState::Idle;
    }

    pub fn snapshot(&self) -> Snapshot {
        let segments = self.snake.body().iter()
            .enumerate()
            .map(|(i, pos)| Segment { pos: *pos, is_head: i == 0 })
            .collect();

        let instruction = match self.run_state {
            RunState::Idle => Some(Instruction::Start),
            RunState::Paused => Some(Instruction::Resume),
            RunState::Running => None,
        };

        Snapshot {
            segments,
            direction: self.snake.direction(),
            food: if self.has_started() { Some(self.food) } else { None },
            score: self.score(),
            high_score: self.high_score,
            show_high_score: self.runs_finished > 0,
            run_state: self.run_state,
            instruction,
        }
    }

    ///////////////////////////////////////////////////////////////////////////

    pub fn score(&self) -> u32 {
        (self.snake.len() - 1) as u32
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn tick_delay_ms(&self) -> u64 {
        self.delay_ms
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn has_started(&self) -> bool {
        self.run_state != RunState::Idle
    }

    pub fn direction(&self) -> Direction {
        self.snake.direction()
    }

    pub fn pending_direction(&self) -> Option<Direction> {
        self.pending_direction
    }

    pub fn food(&self) -> Coords {
        self.food
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    fn update_high_score(&mut self) {
        let score = self.score();
        if score > self.high_score {
            self.high_score = score;
        }
    }

    #[cfg(test)]
    pub(crate) fn place(&mut self, snake: Snake, food: Coords) {
        self.snake = snake;
        self.food = food;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::format_score;
    use crate::snake::Direction::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const SEED: u64 = 7;

    fn running_game() -> GameState<StdRng> {
        let mut state = GameState::with_rng(StdRng::seed_from_u64(SEED));
        assert!(state.start());
        state
    }

    /// The first `n` food positions a game seeded with `SEED` will draw.
    fn food_sequence(n: usize) -> Vec<Coords> {
        let mut rng = StdRng::seed_from_u64(SEED);
        (0..n).map(|_| (rng.gen_range(0..GRID_SIZE), rng.gen_range(0..GRID_SIZE))).collect()
    }

    fn body(state: &GameState<StdRng>) -> Vec<Coords> {
        state.snake().body().iter().copied().collect()
    }

    #[test]
    fn initial_state() {
        let state = GameState::with_rng(StdRng::seed_from_u64(1));
        assert_eq!(body(&state), vec![START_POSITION]);
        assert_eq!(state.direction(), Right);
        assert_eq!(state.run_state(), RunState::Idle);
        assert_eq!(state.tick_delay_ms(), INITIAL_DELAY_MS);
        assert_eq!(state.score(), 0);
        assert_eq!(state.high_score(), 0);

        let (x, y) = state.food();
        assert!(x < GRID_SIZE && y < GRID_SIZE);
    }

    #[test]
    fn plain_move_keeps_length() {
        let mut state = running_game();
        state.place(Snake::new((10, 10), Right), (3, 3));

        assert_eq!(state.tick(), TickOutcome::Moved);
        assert_eq!(body(&state), vec![(11, 10)]);
        assert_eq!(format_score(state.score()), "000");
        assert_eq!(state.tick_delay_ms(), 200);
    }

    #[test]
    fn eating_grows_and_speeds_up() {
        let mut state = running_game();
        state.place(Snake::new((10, 10), Right), (11, 10));

        assert_eq!(state.tick(), TickOutcome::Ate);
        assert_eq!(body(&state), vec![(11, 10), (10, 10)]);
        assert_eq!(format_score(state.score()), "001");
        assert_eq!(state.tick_delay_ms(), 195);
        assert_eq!(state.food(), food_sequence(2)[1]);
    }

    #[test]
    fn plain_move_keeps_food() {
        let mut state = running_game();
        let food = state.food();
        assert_eq!(food, food_sequence(1)[0]);

        // Head starts at (10, 10) heading right, so one step lands on (11, 10)
        if food != (11, 10) {
            assert_eq!(state.tick(), TickOutcome::Moved);
            assert_eq!(state.food(), food);
        }
    }

    #[test]
    fn reset_draws_fresh_food() {
        let mut state = running_game();
        state.place(Snake::new((10, 10), Right), (11, 10));
        state.tick();

        state.reset();
        assert_eq!(state.food(), food_sequence(3)[2]);
    }

    #[test]
    fn moving_left_from_zero_wraps() {
        let mut state = running_game();
        state.place(Snake::new((0, 4), Left), (10, 10));

        state.tick();
        assert_eq!(body(&state), vec![(GRID_SIZE - 1, 4)]);
    }

    #[test]
    fn reverse_request_is_ignored() {
        let mut state = running_game();
        state.set_direction(Left);
        assert_eq!(state.pending_direction(), None);

        state.tick();
        assert_eq!(state.direction(), Right);
    }

    #[test]
    fn only_last_turn_before_tick_counts() {
        let mut state = running_game();
        state.place(Snake::new((10, 10), Right), (0, 0));

        state.set_direction(Up);
        state.set_direction(Down);
        assert_eq!(state.direction(), Right);

        state.tick();
        assert_eq!(state.direction(), Down);
        assert_eq!(body(&state), vec![(10, 11)]);
    }

    #[test]
    fn two_quick_turns_cannot_fold_into_the_neck() {
        let mut state = running_game();
        state.place(Snake::from_segments(&[(5, 5), (4, 5), (3, 5)], Right), (0, 0));

        state.set_direction(Up);
        state.set_direction(Left);
        assert_eq!(state.pending_direction(), Some(Up));

        assert_eq!(state.tick(), TickOutcome::Moved);
        assert_eq!(state.snake().head(), (5, 4));
    }

    #[test]
    fn self_collision_resets_and_records_high_score() {
        let mut state = running_game();
        // Head at (2,2) heading up, body curls round so (2,1) is occupied
        let coil = [(2, 2), (3, 2), (3, 1), (2, 1), (1, 1), (0, 1)];
        state.place(Snake::from_segments(&coil, Up), (15, 15));
        assert_eq!(state.score(), 5);

        assert_eq!(state.tick(), TickOutcome::Crashed { score: 5 });
        assert_eq!(body(&state), vec![START_POSITION]);
        assert_eq!(state.direction(), START_DIRECTION);
        assert_eq!(state.run_state(), RunState::Idle);
        assert_eq!(state.tick_delay_ms(), INITIAL_DELAY_MS);
        assert_eq!(state.high_score(), 5);
        assert_eq!(state.pending_direction(), None);
    }

    #[test]
    fn lower_score_keeps_previous_high_score() {
        let mut state = running_game();
        let coil = [(2, 2), (3, 2), (3, 1), (2, 1), (1, 1), (0, 1)];
        state.place(Snake::from_segments(&coil, Up), (15, 15));
        state.tick();

        state.start();
        let short_coil = [(2, 2), (3, 2), (3, 1), (2, 1), (1, 1)];
        state.place(Snake::from_segments(&short_coil, Up), (15, 15));
        assert_eq!(state.tick(), TickOutcome::Crashed { score: 4 });
        assert_eq!(state.high_score(), 5);
    }

    #[test]
    fn speed_never_drops_below_floor() {
        let mut state = running_game();
        let mut last = state.tick_delay_ms();

        for _ in 0..100 {
            state.increase_speed();
            assert!(state.tick_delay_ms() <= last);
            assert!(state.tick_delay_ms() >= MIN_DELAY_MS);
            last = state.tick_delay_ms();
        }
        assert_eq!(last, MIN_DELAY_MS);
    }

    #[test]
    fn pause_twice_restores_state() {
        let mut state = running_game();
        state.tick();
        let snapshot = state.snapshot();
        let food = state.food();
        let delay = state.tick_delay_ms();

        assert!(state.toggle_pause());
        assert_eq!(state.run_state(), RunState::Paused);
        assert!(state.toggle_pause());

        assert_eq!(state.snapshot(), snapshot);
        assert_eq!(state.food(), food);
        assert_eq!(state.tick_delay_ms(), delay);
    }

    #[test]
    fn invalid_transitions_are_no_ops() {
        let mut state = GameState::with_rng(StdRng::seed_from_u64(3));
        assert!(!state.toggle_pause());
        assert_eq!(state.tick(), TickOutcome::Skipped);
        state.set_direction(Up);
        assert_eq!(state.pending_direction(), None);

        assert!(state.start());
        assert!(!state.start());

        state.toggle_pause();
        assert_eq!(state.tick(), TickOutcome::Skipped);
        state.set_direction(Up);
        assert_eq!(state.pending_direction(), None);
        assert_eq!(body(&state), vec![START_POSITION]);
    }

    #[test]
    fn snapshot_reflects_run_state() {
        let mut state = GameState::with_rng(StdRng::seed_from_u64(9));
        let idle = state.snapshot();
        assert_eq!(idle.food, None);
        assert_eq!(idle.instruction, Some(Instruction::Start));
        assert!(!idle.show_high_score);

        state.start();
        state.place(Snake::from_segments(&[(4, 4), (3, 4)], Right), (9, 9));
        let running = state.snapshot();
        assert_eq!(running.food, Some((9, 9)));
        assert_eq!(running.instruction, None);
        assert_eq!(running.head(), Some((4, 4)));
        assert_eq!(running.segments[0], Segment { pos: (4, 4), is_head: true });
        assert_eq!(running.segments[1], Segment { pos: (3, 4), is_head: false });
        assert_eq!(running.score, 1);

        state.toggle_pause();
        assert_eq!(state.snapshot().instruction, Some(Instruction::Resume));

        state.reset();
        assert!(state.snapshot().show_high_score);
        assert_eq!(state.snapshot().high_score, 1);
    }
}
