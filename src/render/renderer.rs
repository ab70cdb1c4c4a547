use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};
use std::collections::HashSet;

use crate::game::{Cell, GameOverReason, GameState, RenderModel};
use crate::metrics::GameMetrics;

const OVERLAY_WIDTH: u16 = 34;
const OVERLAY_HEIGHT: u16 = 8;
const HINT_WIDTH: u16 = 31;
const HINT_HEIGHT: u16 = 3;

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, model: &RenderModel, metrics: &GameMetrics) {
        let [header, body, footer] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .areas(frame.area());

        frame.render_widget(self.render_stats(model, metrics), header);

        let board = grid_area(body, model);
        frame.render_widget(self.render_grid(model), board);

        match model.state {
            GameState::NotStarted => {
                let hint = centered(body, HINT_WIDTH, HINT_HEIGHT);
                frame.render_widget(Clear, hint);
                frame.render_widget(self.render_start_hint(), hint);
            }
            GameState::GameOver(reason) => {
                let overlay = centered(body, OVERLAY_WIDTH, OVERLAY_HEIGHT);
                frame.render_widget(Clear, overlay);
                frame.render_widget(self.render_game_over(model, reason), overlay);
            }
            GameState::Running => {}
        }

        frame.render_widget(self.render_controls(), footer);
    }

    fn render_grid(&self, model: &RenderModel) -> Paragraph<'static> {
        let head = model.head();
        let body: HashSet<Cell> = model.snake.iter().skip(1).copied().collect();

        let mut lines = Vec::with_capacity(model.grid_height);
        for y in 0..model.grid_height {
            let mut spans = Vec::with_capacity(model.grid_width);

            for x in 0..model.grid_width {
                let cell = Cell::new(x as i32, y as i32);

                let span = if cell == head {
                    Span::styled(
                        "■ ",
                        Style::default()
                            .fg(Color::Blue)
                            .add_modifier(Modifier::BOLD),
                    )
                } else if body.contains(&cell) {
                    Span::styled("■ ", Style::default().fg(Color::Green))
                } else if model.food == Some(cell) {
                    Span::styled(
                        "● ",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )
                } else {
                    Span::styled("· ", Style::default().fg(Color::DarkGray))
                };

                spans.push(span);
            }

            lines.push(Line::from(spans));
        }

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::White))
                .title(" Snake "),
        )
    }

    fn render_stats(&self, model: &RenderModel, metrics: &GameMetrics) -> Paragraph<'static> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let text = vec![Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(model.score.to_string(), value.add_modifier(Modifier::BOLD)),
            Span::raw("    "),
            Span::styled("Length: ", label),
            Span::styled(model.snake.len().to_string(), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(metrics.format_time(), value),
            Span::raw("    "),
            Span::styled("Best: ", label),
            Span::styled(metrics.best_score.to_string(), value),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_game_over(&self, model: &RenderModel, reason: GameOverReason) -> Paragraph<'static> {
        let (headline, colour) = match reason {
            GameOverReason::BoardFull => ("BOARD CLEARED", Color::Green),
            GameOverReason::WallCollision | GameOverReason::SelfCollision => {
                ("GAME OVER", Color::Red)
            }
        };

        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                headline,
                Style::default().fg(colour).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    model.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("R", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
                Span::styled(" restart  ", Style::default().fg(Color::Gray)),
                Span::styled("Q", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
                Span::styled(" quit", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(colour)),
        )
    }

    fn render_start_hint(&self) -> Paragraph<'static> {
        let text = vec![Line::from(vec![
            Span::raw("Press "),
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to start"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
    }

    fn render_controls(&self) -> Paragraph<'static> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" to restart | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// The bordered board, two columns per cell, centered in `area`
fn grid_area(area: Rect, model: &RenderModel) -> Rect {
    let columns = u16::try_from(model.grid_width).unwrap_or(u16::MAX);
    let rows = u16::try_from(model.grid_height).unwrap_or(u16::MAX);
    let width = columns.saturating_mul(2).saturating_add(2);
    let height = rows.saturating_add(2);
    centered(area, width, height)
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [column] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(area);
    let [rect] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(column);
    rect
}
