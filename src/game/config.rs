use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Smallest playable side length
pub const MIN_GRID_SIDE: usize = 2;

/// Largest side length; keeps the free-cell index and the drawn board small
/// enough for a terminal
pub const MAX_GRID_SIDE: usize = 500;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid
    pub grid_width: usize,
    /// Height of the game grid
    pub grid_height: usize,
    /// Milliseconds between game ticks
    pub tick_interval_ms: u64,
    /// Fixed RNG seed for reproducible food placement
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 20,
            grid_height: 20,
            tick_interval_ms: 120,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Same config with a fixed seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Load a JSON config file. Missing fields take their default value.
    pub fn from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        let config: GameConfig = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config {:?}", path))?;
        Ok(config)
    }

    /// Check that the grid is playable and the ticker can run
    pub fn validate(&self) -> Result<()> {
        if self.grid_width < MIN_GRID_SIDE || self.grid_height < MIN_GRID_SIDE {
            bail!(
                "grid must be at least {}x{} cells, got {}x{}",
                MIN_GRID_SIDE,
                MIN_GRID_SIDE,
                self.grid_width,
                self.grid_height
            );
        }

        if self.grid_width > MAX_GRID_SIDE || self.grid_height > MAX_GRID_SIDE {
            bail!(
                "grid must be at most {}x{} cells, got {}x{}",
                MAX_GRID_SIDE,
                MAX_GRID_SIDE,
                self.grid_width,
                self.grid_height
            );
        }

        if self.tick_interval_ms == 0 {
            bail!("tick_interval_ms must be at least 1");
        }

        Ok(())
    }
}
