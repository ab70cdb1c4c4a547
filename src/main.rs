use anyhow::Result;
use clap::Parser;
use log::info;
use std::path::PathBuf;
use term_snake::game::GameConfig;
use term_snake::logging::{init_logging, LogLevel};
use term_snake::modes::HumanMode;

#[derive(Parser)]
#[command(name = "term_snake")]
#[command(version, about = "Single-player snake in the terminal")]
struct Cli {
    /// JSON config file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid width in cells
    #[arg(long)]
    width: Option<usize>,

    /// Grid height in cells
    #[arg(long)]
    height: Option<usize>,

    /// Milliseconds between ticks
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Seed for food placement
    #[arg(long)]
    seed: Option<u64>,

    /// Where to write the log
    #[arg(long, default_value = "term_snake.log")]
    log_file: PathBuf,

    #[arg(long, value_enum, default_value = "info")]
    log_level: LogLevel,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_file(path)?,
            None => GameConfig::default(),
        };

        if let Some(width) = self.width {
            config.grid_width = width;
        }
        if let Some(height) = self.height {
            config.grid_height = height;
        }
        if let Some(tick_ms) = self.tick_ms {
            config.tick_interval_ms = tick_ms;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }

        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Config errors are reported before the terminal enters raw mode
    let config = cli.game_config()?;
    init_logging(&cli.log_file, cli.log_level)?;
    info!("Loaded config: {:?}", config);

    let mut human_mode = HumanMode::new(config)?;
    human_mode.run().await?;

    Ok(())
}
