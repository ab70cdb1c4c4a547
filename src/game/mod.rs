//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The engine only changes state through `set_direction` and `tick`; scheduling
//! those calls is up to the caller.

pub mod config;
pub mod direction;
pub mod engine;
pub mod grid;
pub mod state;

// Re-export commonly used types
pub use config::GameConfig;
pub use direction::Direction;
pub use engine::{GameEngine, RenderModel};
pub use grid::{FreeCells, Grid};
pub use state::{Cell, GameOverReason, GameState, Snake};
