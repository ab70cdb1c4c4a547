use anyhow::Result;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use super::{
    config::GameConfig,
    direction::Direction,
    grid::{FreeCells, Grid},
    state::{Cell, GameOverReason, GameState, Snake},
};

/// Read-only snapshot handed to the renderer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderModel {
    /// Snake cells, head first
    pub snake: Vec<Cell>,
    /// `None` only once the board is full
    pub food: Option<Cell>,
    pub score: u32,
    pub state: GameState,
    pub grid_width: usize,
    pub grid_height: usize,
}

impl RenderModel {
    pub fn head(&self) -> Cell {
        self.snake[0]
    }
}

/// The game engine that owns and advances all game state
pub struct GameEngine {
    config: GameConfig,
    grid: Grid,
    snake: Snake,
    pending_direction: Direction,
    active_direction: Direction,
    food: Option<Cell>,
    score: u32,
    state: GameState,
    free_cells: FreeCells,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Result<Self> {
        config.validate()?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let grid = Grid::new(config.grid_width, config.grid_height);
        let snake = Snake::new(grid.center());

        let mut engine = Self {
            config,
            grid,
            free_cells: FreeCells::with_occupied(grid, snake.cells()),
            snake,
            pending_direction: Direction::Right,
            active_direction: Direction::Right,
            food: None,
            score: 0,
            state: GameState::NotStarted,
            rng,
        };
        engine.food = engine.spawn_food();

        Ok(engine)
    }

    /// Throw the current game away and set up a fresh one.
    ///
    /// The RNG keeps its stream, so a seeded session stays reproducible.
    pub fn restart(&mut self) {
        self.snake = Snake::new(self.grid.center());
        self.free_cells = FreeCells::with_occupied(self.grid, self.snake.cells());
        self.pending_direction = Direction::Right;
        self.active_direction = Direction::Right;
        self.score = 0;
        self.state = GameState::NotStarted;
        self.food = self.spawn_food();

        info!("Game restarted");
    }

    /// Request a direction for the next tick.
    ///
    /// The first call starts the game. A request for the exact reverse of the
    /// direction used on the last tick is dropped.
    pub fn set_direction(&mut self, requested: Direction) {
        match self.state {
            GameState::GameOver(_) => return,
            GameState::NotStarted => {
                self.state = GameState::Running;
                info!("Game started");
            }
            GameState::Running => {}
        }

        if self.active_direction.is_opposite(requested) {
            debug!("Ignoring reversal to {:?}", requested);
            return;
        }

        self.pending_direction = requested;
    }

    /// Advance the game by one step
    pub fn tick(&mut self) -> RenderModel {
        if !self.state.is_running() {
            return self.render_model();
        }

        self.active_direction = self.pending_direction;
        let new_head = self.snake.head().moved_in_direction(self.active_direction);

        if !self.grid.contains(new_head) {
            self.end_game(GameOverReason::WallCollision);
            return self.render_model();
        }

        let grew = self.food == Some(new_head);

        if self.snake.blocks(new_head, grew) {
            self.end_game(GameOverReason::SelfCollision);
            return self.render_model();
        }

        if let Some(tail) = self.snake.advance(new_head, grew) {
            self.free_cells.release(tail);
        }
        self.free_cells.occupy(new_head);

        if grew {
            self.score += 1;
            debug!(
                "Ate food at ({}, {}). Score: {}",
                new_head.x, new_head.y, self.score
            );

            self.food = self.spawn_food();
            if self.food.is_none() {
                self.end_game(GameOverReason::BoardFull);
            }
        }

        self.render_model()
    }

    /// Snapshot of the current state
    pub fn render_model(&self) -> RenderModel {
        RenderModel {
            snake: self.snake.cells().collect(),
            food: self.food,
            score: self.score,
            state: self.state,
            grid_width: self.grid.width,
            grid_height: self.grid.height,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Option<Cell> {
        self.food
    }

    pub fn active_direction(&self) -> Direction {
        self.active_direction
    }

    pub fn pending_direction(&self) -> Direction {
        self.pending_direction
    }

    fn end_game(&mut self, reason: GameOverReason) {
        self.state = GameState::GameOver(reason);
        info!(
            "Game over ({:?}). Final score: {}, length: {}",
            reason,
            self.score,
            self.snake.len()
        );
    }

    /// Pick a uniformly random cell not covered by the snake
    fn spawn_food(&mut self) -> Option<Cell> {
        if self.free_cells.is_empty() {
            return None;
        }
        let n = self.rng.gen_range(0..self.free_cells.len());
        self.free_cells.nth(n)
    }
}
