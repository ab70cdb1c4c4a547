use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use log::{info, warn};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::{interval, MissedTickBehavior};

use crate::game::{Direction, GameConfig, GameEngine, GameState};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

/// Render at roughly 30 FPS, independent of the game tick
const RENDER_INTERVAL: Duration = Duration::from_millis(33);

/// Keyboard play in the terminal: the ticker, the key source and the renderer
/// all run on one task, so engine calls never overlap.
pub struct HumanMode {
    engine: GameEngine,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    tick_interval: Duration,
    /// Set when a game starts so the first move lands one full tick later
    restart_ticker: bool,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(config: GameConfig) -> Result<Self> {
        let tick_interval = config.tick_interval();
        let engine = GameEngine::new(config).context("Invalid game configuration")?;

        Ok(Self {
            engine,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            tick_interval,
            restart_ticker: false,
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut terminal = match setup_terminal() {
            Ok(terminal) => terminal,
            Err(err) => {
                let restored = disable_raw_mode()
                    .and_then(|()| execute!(stderr(), LeaveAlternateScreen))
                    .context("Failed to restore terminal");
                return first_error(Err(err), restored);
            }
        };

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal; the loop's own error is the one worth reporting
        let cleanup = cleanup_terminal(&mut terminal);

        first_error(result, cleanup)
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();
        let mut tick_timer = interval(self.tick_interval);
        tick_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut render_timer = interval(RENDER_INTERVAL);

        info!(
            "Starting {}x{} game, tick every {:?}",
            self.engine.config().grid_width,
            self.engine.config().grid_height,
            self.tick_interval
        );

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(err)) => warn!("Failed to read terminal event: {}", err),
                        None => self.should_quit = true,
                    }
                }

                // Game logic tick; the ticker idles unless a game is running
                _ = tick_timer.tick() => {
                    self.update_game();
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update();
                    let model = self.engine.render_model();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &model, &self.metrics);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if std::mem::take(&mut self.restart_ticker) {
                tick_timer.reset();
            }

            if self.should_quit {
                info!("Quitting");
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }

            match self.input_handler.handle_key_event(key) {
                KeyAction::Turn(direction) => self.turn(direction),
                KeyAction::Restart => self.restart_game(),
                KeyAction::Quit => self.should_quit = true,
                KeyAction::None => {}
            }
        }
    }

    fn turn(&mut self, direction: Direction) {
        let was_waiting = self.engine.state() == GameState::NotStarted;
        self.engine.set_direction(direction);

        if was_waiting && self.engine.state().is_running() {
            self.metrics.on_game_start();
            self.restart_ticker = true;
        }
    }

    fn update_game(&mut self) {
        if !self.engine.state().is_running() {
            return;
        }

        let model = self.engine.tick();

        if model.state.is_over() {
            self.metrics.on_game_over(model.score);
        }
    }

    fn restart_game(&mut self) {
        self.engine.restart();
        self.metrics.on_restart();
    }
}

/// Everything after raw mode is on; on error the caller still has to leave raw mode
fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stderr>>> {
    let mut stderr = stderr();
    execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stderr);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
    terminal.hide_cursor().context("Failed to hide cursor")?;
    terminal.clear().context("Failed to clear terminal")?;
    Ok(terminal)
}

/// Runs every restore step even when an earlier one fails
fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<Stderr>>) -> Result<()> {
    let raw = disable_raw_mode().context("Failed to disable raw mode");
    let screen = execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to leave alternate screen");
    let cursor = terminal.show_cursor().context("Failed to show cursor");
    first_error(first_error(raw, screen), cursor)
}

/// `primary`'s error wins; `secondary` only surfaces when `primary` succeeded
fn first_error(primary: Result<()>, secondary: Result<()>) -> Result<()> {
    if let Err(err) = &secondary {
        if primary.is_err() {
            warn!("Suppressed while handling an earlier error: {:#}", err);
        }
    }
    primary.and(secondary)
}
