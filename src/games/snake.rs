//! Snake: a tick-driven grid simulation with growth and collision.
//!
//! The engine is tick-driven, not time-aware. An external driver calls
//! [`Snake::tick`] on a fixed cadence (the shell uses ~150 ms) and
//! stops once `status` is [`SnakeStatus::Over`]; pausing the driver is
//! the entire cancellation story.
//!
//! Direction changes are buffered: only the latest valid request before
//! a tick takes effect, and a request reversing the committed direction
//! is rejected outright, so no same-tick combination of key presses can
//! drive the head into its own neck.

use im::Vector;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{Direction, Engine, GameRng, Point};

/// Snake configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnakeConfig {
    /// Board is `grid_size × grid_size` cells.
    pub grid_size: i32,
    /// Score awarded per food eaten.
    pub points_per_food: u32,
    /// Head cell of the fresh single-segment snake.
    pub initial_head: Point,
    /// Food cell before the first meal.
    pub initial_food: Point,
}

impl Default for SnakeConfig {
    fn default() -> Self {
        Self {
            grid_size: 20,
            points_per_food: 10,
            initial_head: Point::new(10, 10),
            initial_food: Point::new(5, 5),
        }
    }
}

/// Lifecycle status.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SnakeStatus {
    /// Created or reset; waiting for the start input.
    NotStarted,
    /// The tick driver is advancing the simulation.
    Running,
    /// Wall or self collision; ticks no longer mutate state.
    Over,
}

/// Observable snake state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnakeState {
    /// Body cells, head first. Never empty; no duplicates while alive.
    pub segments: Vector<Point>,
    /// Always disjoint from `segments`.
    pub food: Point,
    /// Direction committed at the last tick. Meaningful only once
    /// running.
    pub direction: Direction,
    pub status: SnakeStatus,
    pub score: u32,
}

/// Inputs the shell forwards into the snake engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SnakeCommand {
    /// The start button.
    Start,
    /// An arrow key.
    Turn(Direction),
}

/// Snake rule engine.
#[derive(Clone, Debug)]
pub struct Snake {
    config: SnakeConfig,
    rng: GameRng,
    state: SnakeState,
    /// Latest valid direction request since the last tick.
    pending_direction: Option<Direction>,
}

impl Snake {
    /// Create a snake on the default 20×20 board.
    #[must_use]
    pub fn new(rng: GameRng) -> Self {
        Self::with_config(SnakeConfig::default(), rng)
    }

    /// Create a snake with a custom board.
    ///
    /// Panics if the configuration cannot produce a legal board: the
    /// head or food outside the grid, or food on the head.
    #[must_use]
    pub fn with_config(config: SnakeConfig, rng: GameRng) -> Self {
        assert!(config.grid_size > 1, "Grid must hold more than one cell");
        assert!(
            config.initial_head.in_bounds(config.grid_size),
            "Initial head must be on the board"
        );
        assert!(
            config.initial_food.in_bounds(config.grid_size),
            "Initial food must be on the board"
        );
        assert!(
            config.initial_food != config.initial_head,
            "Initial food must not sit on the snake"
        );

        Self {
            state: initial_state(&config),
            config,
            rng,
            pending_direction: None,
        }
    }

    /// Get the board configuration.
    #[must_use]
    pub fn config(&self) -> &SnakeConfig {
        &self.config
    }

    /// Read-only snapshot for rendering.
    #[must_use]
    pub fn state(&self) -> &SnakeState {
        &self.state
    }

    fn head(&self) -> Point {
        self.state.segments[0]
    }

    /// Begin the run: valid only from `NotStarted`, heading right.
    pub fn start(&mut self) {
        if self.state.status != SnakeStatus::NotStarted {
            return;
        }

        self.state.status = SnakeStatus::Running;
        self.state.direction = Direction::Right;
        self.pending_direction = None;
        debug!("run started");
    }

    /// Buffer a direction change for the next tick.
    ///
    /// Requests while not running, and requests reversing the committed
    /// direction, are ignored. The latest surviving request wins; the
    /// buffer is drained once per tick.
    pub fn set_direction(&mut self, direction: Direction) {
        if self.state.status != SnakeStatus::Running {
            return;
        }
        if direction == self.state.direction.opposite() {
            return;
        }

        self.pending_direction = Some(direction);
    }

    /// Advance the snake one cell.
    ///
    /// Only mutates state while `Running`. Hitting a wall or a body
    /// segment ends the run with segments unchanged. Eating food grows
    /// the snake by one, scores, and respawns food on a free cell;
    /// otherwise the tail cell is vacated to keep the length constant.
    pub fn tick(&mut self) {
        if self.state.status != SnakeStatus::Running {
            return;
        }

        if let Some(direction) = self.pending_direction.take() {
            self.state.direction = direction;
        }

        let head = self.head().step(self.state.direction);

        let hits_wall = !head.in_bounds(self.config.grid_size);
        let hits_body = self.state.segments.iter().any(|&segment| segment == head);
        if hits_wall || hits_body {
            debug!(%head, score = self.state.score, "collision, run over");
            self.state.status = SnakeStatus::Over;
            return;
        }

        self.state.segments.push_front(head);

        if head == self.state.food {
            self.state.score += self.config.points_per_food;
            match self.spawn_food() {
                Some(food) => {
                    self.state.food = food;
                    debug!(%food, score = self.state.score, "food eaten");
                }
                // The snake covers every cell; nothing left to eat.
                None => {
                    debug!(score = self.state.score, "board full, run over");
                    self.state.status = SnakeStatus::Over;
                }
            }
        } else {
            self.state.segments.pop_back();
        }
    }

    /// Uniform draw over the cells not covered by the snake, `None`
    /// when no free cell remains.
    fn spawn_food(&mut self) -> Option<Point> {
        let occupied: FxHashSet<Point> = self.state.segments.iter().copied().collect();
        let size = self.config.grid_size;

        let free: Vec<Point> = (0..size)
            .flat_map(|y| (0..size).map(move |x| Point::new(x, y)))
            .filter(|cell| !occupied.contains(cell))
            .collect();

        if free.is_empty() {
            return None;
        }

        Some(free[self.rng.gen_range_usize(0..free.len())])
    }

    /// Back to `NotStarted`: fresh single-segment snake, food at the
    /// configured initial cell, score zero.
    pub fn reset(&mut self) {
        self.state = initial_state(&self.config);
        self.pending_direction = None;
    }
}

fn initial_state(config: &SnakeConfig) -> SnakeState {
    SnakeState {
        segments: Vector::unit(config.initial_head),
        food: config.initial_food,
        direction: Direction::Right,
        status: SnakeStatus::NotStarted,
        score: 0,
    }
}

impl Engine for Snake {
    type Input = SnakeCommand;
    type State = SnakeState;

    fn apply_input(&mut self, input: SnakeCommand) {
        match input {
            SnakeCommand::Start => self.start(),
            SnakeCommand::Turn(direction) => self.set_direction(direction),
        }
    }

    fn tick(&mut self) {
        Snake::tick(self);
    }

    fn is_terminal(&self) -> bool {
        self.state.status == SnakeStatus::Over
    }

    fn score(&self) -> u32 {
        self.state.score
    }

    fn reset(&mut self) {
        Snake::reset(self);
    }

    fn state(&self) -> &SnakeState {
        &self.state
    }
}
