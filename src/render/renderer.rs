use std::collections::HashMap;

use glam::Vec2;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{GamePhase, GameState};
use crate::metrics::SessionMetrics;

/// Terminal frontend: the stand-in for the host engine's render, transform
/// and UI-panel services.
pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, state: &GameState, metrics: &SessionMetrics) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Play area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let stats = self.render_stats(state, metrics);
        frame.render_widget(stats, chunks[0]);

        match state.phase {
            GamePhase::NotStarted => {
                frame.render_widget(self.render_start_panel(), chunks[1]);
            }
            GamePhase::Running => {
                frame.render_widget(self.render_arena(chunks[1], state), chunks[1]);
            }
            GamePhase::GameOver => {
                frame.render_widget(self.render_game_over(state), chunks[1]);
            }
        }

        frame.render_widget(self.render_controls(), chunks[2]);
    }

    /// Map the continuous, centered, y-up play area onto terminal cells.
    fn cell_of(pos: Vec2, state: &GameState, cols: u16, rows: u16) -> (u16, u16) {
        let (hw, hh) = state.half_extents();
        let cx = ((pos.x + hw) / (hw * 2.0) * cols as f32) as i32;
        let cy = ((hh - pos.y) / (hh * 2.0) * rows as f32) as i32;
        (
            cx.clamp(0, cols as i32 - 1) as u16,
            cy.clamp(0, rows as i32 - 1) as u16,
        )
    }

    fn render_arena<'a>(&self, area: Rect, state: &GameState) -> Paragraph<'a> {
        let cols = area.width.saturating_sub(2).max(1);
        let rows = area.height.saturating_sub(2).max(1);

        // Highest stacking order wins when several entities land on the
        // same cell; food sits below every segment.
        let mut cells: HashMap<(u16, u16), (char, Style, u32)> = HashMap::new();

        let food = state.food;
        let (r, g, b) = food.color;
        cells.insert(
            Self::cell_of(food.pos, state, cols, rows),
            (
                '@',
                Style::default()
                    .fg(Color::Rgb(r, g, b))
                    .add_modifier(Modifier::BOLD),
                0,
            ),
        );

        let mut segments: Vec<(Vec2, u32)> = state.chain.segments().collect();
        segments.sort_by_key(|(_, order)| *order);

        for (i, (pos, order)) in segments.iter().enumerate() {
            let is_head = i == segments.len() - 1;
            let glyph = if is_head {
                Self::head_glyph(state.facing)
            } else {
                'o'
            };
            let style = if is_head {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Green)
            };
            let cell = Self::cell_of(*pos, state, cols, rows);
            let entry = cells.entry(cell).or_insert((glyph, style, order + 1));
            if order + 1 >= entry.2 {
                *entry = (glyph, style, order + 1);
            }
        }

        let mut lines = Vec::with_capacity(rows as usize);
        for row in 0..rows {
            let mut spans = Vec::with_capacity(cols as usize);
            for col in 0..cols {
                match cells.get(&(col, row)) {
                    Some((glyph, style, _)) => {
                        spans.push(Span::styled(glyph.to_string(), *style))
                    }
                    None => spans.push(Span::styled(".", Style::default().fg(Color::DarkGray))),
                }
            }
            lines.push(Line::from(spans));
        }

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::White))
                .title(" slither "),
        )
    }

    /// Head glyph for the current facing, quantized to the four cardinals.
    fn head_glyph(facing: f32) -> char {
        let deg = facing.to_degrees();
        if (-45.0..=45.0).contains(&deg) {
            '>'
        } else if (45.0..135.0).contains(&deg) {
            '^'
        } else if (-135.0..-45.0).contains(&deg) {
            'v'
        } else {
            '<'
        }
    }

    fn render_stats<'a>(&self, state: &GameState, metrics: &SessionMetrics) -> Paragraph<'a> {
        let text = vec![Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                state.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.format_clock(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Best: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                metrics.best_score().to_string(),
                Style::default().fg(Color::White),
            ),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_start_panel<'a>(&self) -> Paragraph<'a> {
        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "SLITHER",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![Span::styled(
                "Steer with the arrow keys, hold Space to boost.",
                Style::default().fg(Color::Gray),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Enter",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to start", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Green)),
        )
    }

    fn render_game_over<'a>(&self, state: &GameState) -> Paragraph<'a> {
        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    state.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "R",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to restart or ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Q",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls<'a>(&self) -> Paragraph<'a> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to steer | "),
            Span::styled("Space", Style::default().fg(Color::Cyan)),
            Span::raw(" to boost | "),
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
