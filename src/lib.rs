//! Term Snake - single-player grid snake for the terminal
//!
//! This library provides:
//! - Core game logic with no I/O (game module)
//! - Keyboard mapping (input module)
//! - TUI rendering (render module)
//! - Session statistics (metrics module)
//! - The interactive keyboard mode wiring them together (modes module)
//! - File logging setup (logging module)

pub mod game;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod modes;
pub mod render;
