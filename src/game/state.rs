use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use super::direction::Direction;

/// A cell on the game grid, addressed by column and row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move cell by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// The neighbouring cell in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at the front
    body: VecDeque<Cell>,
}

impl Snake {
    /// Create a one-cell snake
    pub fn new(head: Cell) -> Self {
        Self {
            body: VecDeque::from([head]),
        }
    }

    /// Build a snake from head-first cells. Returns `None` for an empty list.
    pub fn from_cells(cells: impl IntoIterator<Item = Cell>) -> Option<Self> {
        let body: VecDeque<Cell> = cells.into_iter().collect();
        if body.is_empty() {
            return None;
        }
        Some(Self { body })
    }

    /// Get the head position
    pub fn head(&self) -> Cell {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Cell {
        self.body[self.body.len() - 1]
    }

    /// Segments head-first
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.body.iter().copied()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Whether moving the head into `cell` would hit the body.
    ///
    /// When the snake is not growing its tail leaves on the same tick the head
    /// arrives, so the tail cell is not an obstacle.
    pub fn blocks(&self, cell: Cell, growing: bool) -> bool {
        let checked = if growing {
            self.body.len()
        } else {
            self.body.len() - 1
        };
        self.body.iter().take(checked).any(|&segment| segment == cell)
    }

    /// Push a new head and, unless growing, drop the tail.
    ///
    /// Returns the vacated tail cell, if any.
    pub fn advance(&mut self, new_head: Cell, grow: bool) -> Option<Cell> {
        self.body.push_front(new_head);

        if grow {
            None
        } else {
            self.body.pop_back()
        }
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false for a constructed snake
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Why a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverReason {
    /// Snake hit a wall
    WallCollision,
    /// Snake hit itself
    SelfCollision,
    /// The snake fills every cell, so no food can be placed
    BoardFull,
}

/// Lifecycle of a single game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    /// Waiting for the first direction input
    NotStarted,
    Running,
    /// Terminal
    GameOver(GameOverReason),
}

impl GameState {
    pub fn is_running(&self) -> bool {
        matches!(self, GameState::Running)
    }

    pub fn is_over(&self) -> bool {
        matches!(self, GameState::GameOver(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snake_of(cells: &[(i32, i32)]) -> Snake {
        Snake::from_cells(cells.iter().map(|&(x, y)| Cell::new(x, y))).unwrap()
    }

    #[test]
    fn test_cell_movement() {
        let cell = Cell::new(5, 5);
        assert_eq!(cell.moved_by(1, 0), Cell::new(6, 5));
        assert_eq!(cell.moved_by(-1, 0), Cell::new(4, 5));
        assert_eq!(cell.moved_in_direction(Direction::Down), Cell::new(5, 6));
        assert_eq!(cell.moved_in_direction(Direction::Up), Cell::new(5, 4));
    }

    #[test]
    fn test_snake_from_cells() {
        assert!(Snake::from_cells(Vec::new()).is_none());

        let snake = snake_of(&[(5, 5), (4, 5), (3, 5)]);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Cell::new(5, 5));
        assert_eq!(snake.tail(), Cell::new(3, 5));
    }

    #[test]
    fn test_snake_advance() {
        let mut snake = snake_of(&[(5, 5), (4, 5), (3, 5)]);

        let vacated = snake.advance(Cell::new(6, 5), false);
        assert_eq!(vacated, Some(Cell::new(3, 5)));
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Cell::new(6, 5));

        let vacated = snake.advance(Cell::new(7, 5), true);
        assert_eq!(vacated, None);
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.tail(), Cell::new(4, 5));
    }

    #[test]
    fn test_blocks_ignores_moving_tail() {
        // Square loop: head at (5,5), tail at (5,6) right below it
        let snake = snake_of(&[(5, 5), (6, 5), (6, 6), (5, 6)]);

        assert!(!snake.blocks(Cell::new(5, 6), false));
        assert!(snake.blocks(Cell::new(5, 6), true));
        assert!(snake.blocks(Cell::new(6, 6), false));
        assert!(!snake.blocks(Cell::new(4, 5), false));
    }

    #[test]
    fn test_single_cell_snake_never_blocks_when_moving() {
        let snake = Snake::new(Cell::new(1, 1));
        assert!(!snake.blocks(Cell::new(1, 1), false));
    }

    #[test]
    fn test_game_state_flags() {
        assert!(!GameState::NotStarted.is_running());
        assert!(GameState::Running.is_running());
        assert!(GameState::GameOver(GameOverReason::WallCollision).is_over());
        assert!(!GameState::Running.is_over());
    }
}
