use anyhow::{Context, Result};
use crossterm::{
    event::{
        Event, EventStream, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use futures::StreamExt;
use glam::Vec2;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{stderr, Stderr};
use std::time::{Duration, Instant};
use tokio::time::interval;

use crate::game::{Contact, GameConfig, GameEngine, GamePhase, GameState};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::SessionMetrics;
use crate::render::Renderer;

/// Interactive play: the driver that stands in for the host engine's scene
/// lifecycle, collision service and timers.
pub struct PlayMode {
    engine: GameEngine,
    state: GameState,
    metrics: SessionMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
    pending_steer: Vec2,
    /// Terminals without the enhancement protocol never report key
    /// releases; Space then toggles boost instead of acting as held.
    release_events: bool,
}

impl PlayMode {
    pub fn new(config: GameConfig) -> Self {
        let mut engine = GameEngine::new(config);
        let state = engine.initialize();

        Self {
            engine,
            state,
            metrics: SessionMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
            pending_steer: Vec2::ZERO,
            release_events: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;

        self.release_events = matches!(supports_keyboard_enhancement(), Ok(true));
        if self.release_events {
            execute!(
                stderr,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )
            .context("Failed to enable key release reporting")?;
        }

        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Head motion integrates every frame at ~60 Hz with the measured dt.
        let mut frame_timer = interval(Duration::from_millis(16));

        // The body follows on its own, coarser cadence.
        let follow_period = Duration::from_secs_f32(self.engine.config().follow_period);
        let mut follow_timer = interval(follow_period);

        // Render at 30 FPS (33ms per frame)
        let mut render_timer = interval(Duration::from_millis(33));

        let mut last_frame = Instant::now();

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                // Head motion frame
                _ = frame_timer.tick() => {
                    let now = Instant::now();
                    let dt = now.duration_since(last_frame).as_secs_f32();
                    last_frame = now;
                    self.advance_frame(dt);
                }

                // Body follow tick
                _ = follow_timer.tick() => {
                    self.engine.follow_tick(&mut self.state);
                }

                // Render frame
                _ = render_timer.tick() => {
                    if self.state.phase == GamePhase::Running {
                        self.metrics.tick_clock();
                    }
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.state, &self.metrics);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        let Event::Key(key) = event else { return };

        match self.input_handler.handle_key_event(key) {
            KeyAction::Steer(dir) => {
                self.pending_steer = dir;
            }
            KeyAction::BoostPressed => {
                let active = if self.release_events {
                    true
                } else {
                    !self.state.boosting
                };
                self.engine.set_boost(&mut self.state, active);
            }
            KeyAction::BoostReleased => {
                self.engine.set_boost(&mut self.state, false);
            }
            KeyAction::Start => {
                if self.state.phase == GamePhase::NotStarted {
                    self.engine.start(&mut self.state);
                    self.metrics.on_run_start();
                }
            }
            KeyAction::Restart => {
                if self.state.phase == GamePhase::GameOver {
                    self.reload();
                }
            }
            KeyAction::Quit => {
                self.should_quit = true;
            }
            KeyAction::None => {}
        }
    }

    fn advance_frame(&mut self, dt: f32) {
        // Steering is consumed per frame; nothing pressed means a neutral
        // stick and the engine falls back to the last heading.
        let steer = std::mem::replace(&mut self.pending_steer, Vec2::ZERO);

        let was_running = self.state.phase == GamePhase::Running;
        self.engine.tick(&mut self.state, steer, dt);

        for contact in self.detect_contacts() {
            self.engine.on_contact(&mut self.state, contact);
        }

        if was_running && self.state.phase == GamePhase::GameOver {
            self.metrics.on_game_over(self.state.score);
        }
    }

    /// Stand-in for the collision service: a circle test against the food
    /// and a bounds test against the play-area walls.
    fn detect_contacts(&self) -> Vec<Contact> {
        let mut contacts = Vec::new();
        let Some(head) = self.state.head_pos() else {
            return contacts;
        };

        if head.distance(self.state.food.pos) <= self.engine.config().contact_radius {
            contacts.push(Contact::Food {
                id: self.state.food.id,
            });
        }

        if !self.state.is_in_bounds(head) {
            contacts.push(Contact::Obstacle);
        }

        contacts
    }

    /// The restart path is a full scene reload: every piece of game state is
    /// rebuilt from config.
    fn reload(&mut self) {
        self.state = self.engine.initialize();
        self.pending_steer = Vec2::ZERO;
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        if self.release_events {
            execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags)
                .context("Failed to disable key release reporting")?;
        }
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
