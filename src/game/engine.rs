use glam::Vec2;
use rand::Rng;
use tracing::{debug, warn};

use super::{
    chain::SegmentChain,
    config::GameConfig,
    error::SimError,
    state::{Contact, Food, GamePhase, GameState},
};

/// The game engine that owns head steering, growth and the contact policy.
pub struct GameEngine {
    config: GameConfig,
    rng: rand::rngs::ThreadRng,
    food_seq: u64,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            rng: rand::thread_rng(),
            food_seq: 0,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Build a fresh game state.
    ///
    /// Shorthand for `initialize_with` and an empty pre-configured list.
    pub fn initialize(&mut self) -> GameState {
        self.initialize_with(&[])
    }

    /// Build a fresh game state, adopting any pre-wired body segments.
    ///
    /// Absent entries are discarded, the head is tracked as chain index 0,
    /// the initial facing comes from the head's configured start position,
    /// the configured number of body segments is synthesized behind it, and
    /// only then is the head relocated to a random in-bounds position.
    pub fn initialize_with(&mut self, preconfigured: &[Option<Vec2>]) -> GameState {
        let head_start = self.config.head_start;
        let mut chain = SegmentChain::new(self.config.segment_spacing, head_start);
        for pos in preconfigured.iter().flatten() {
            chain.adopt(*pos);
        }

        for _ in 0..self.config.initial_body_count {
            if let Err(e) = chain.append() {
                warn!(error = %e, "skipping initial body segment");
            }
        }

        // Half a spacing of margin keeps the freshly placed head clear of
        // the play-area edge.
        let head_pos = self.random_pos(self.config.segment_spacing / 2.0);
        chain.set_head_pos(head_pos);
        debug!(?head_pos, segments = chain.len(), "chain initialized");

        let food = self.spawn_food();

        GameState {
            chain,
            food,
            phase: GamePhase::NotStarted,
            score: 0,
            speed: self.config.base_speed,
            boosting: false,
            last_dir: head_start.normalize_or_zero(),
            facing: head_start.to_angle(),
            arena_width: self.config.arena_width,
            arena_height: self.config.arena_height,
        }
    }

    /// Begin play. Only meaningful from `NotStarted`.
    pub fn start(&mut self, state: &mut GameState) {
        if state.phase == GamePhase::NotStarted {
            state.phase = GamePhase::Running;
        }
    }

    /// Integrate one frame of head motion.
    ///
    /// A zero steering vector reuses the last nonzero direction, so the
    /// snake keeps moving through idle input. Facing follows the commanded
    /// heading.
    pub fn tick(&mut self, state: &mut GameState, steer: Vec2, dt: f32) {
        if state.phase != GamePhase::Running {
            return;
        }

        let Some(head_pos) = state.chain.head_pos() else {
            warn!(
                error = %SimError::MissingCollaborator("head segment"),
                "skipping tick"
            );
            return;
        };

        let commanded = steer.normalize_or_zero();
        let dir = if commanded == Vec2::ZERO {
            state.last_dir
        } else {
            state.last_dir = commanded;
            state.facing = commanded.to_angle();
            commanded
        };

        state.chain.set_head_pos(head_pos + dir * state.speed * dt);
    }

    /// Propagate body positions down the chain.
    ///
    /// Runs on its own fixed period, deliberately coarser than the frame
    /// tick; the head can move several frames between two of these.
    pub fn follow_tick(&mut self, state: &mut GameState) {
        if state.phase != GamePhase::Running {
            return;
        }
        if let Err(e) = state.chain.follow_tick() {
            warn!(error = %e, "skipping follow tick");
        }
    }

    /// Apply a contact reported by the collision check.
    pub fn on_contact(&mut self, state: &mut GameState, contact: Contact) {
        if state.phase != GamePhase::Running {
            return;
        }

        match contact {
            Contact::Food { id } => {
                if id != state.food.id {
                    debug!(id, live = state.food.id, "ignoring stale food contact");
                    return;
                }
                state.score += 1;
                // Replacing the instance in one step leaves no gap with zero
                // or two food items alive.
                state.food = self.spawn_food();
                if let Err(e) = state.chain.append() {
                    warn!(error = %e, "growth skipped");
                }
            }
            Contact::Obstacle => {
                state.phase = GamePhase::GameOver;
                debug!(score = state.score, "game over");
            }
        }
    }

    /// Hold or release the boost control.
    ///
    /// Speed is assigned, never accumulated: repeated activation without a
    /// release cannot push past base + bonus.
    pub fn set_boost(&mut self, state: &mut GameState, active: bool) {
        if state.phase != GamePhase::Running {
            return;
        }
        state.boosting = active;
        state.speed = if active {
            self.config.base_speed + self.config.boost_bonus
        } else {
            self.config.base_speed
        };
    }

    fn spawn_food(&mut self) -> Food {
        self.food_seq += 1;
        Food {
            id: self.food_seq,
            pos: self.random_pos(0.0),
            color: (
                self.rng.gen_range(0..=255u8),
                self.rng.gen_range(0..=255u8),
                self.rng.gen_range(0..=255u8),
            ),
        }
    }

    fn random_pos(&mut self, margin: f32) -> Vec2 {
        let hw = self.config.arena_width / 2.0 - margin;
        let hh = self.config.arena_height / 2.0 - margin;
        Vec2::new(
            self.rng.gen_range(-hw..=hw),
            self.rng.gen_range(-hh..=hh),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::vec2;

    fn running_engine() -> (GameEngine, GameState) {
        let mut engine = GameEngine::new(GameConfig::small());
        let mut state = engine.initialize();
        engine.start(&mut state);
        (engine, state)
    }

    #[test]
    fn test_initialize() {
        let mut engine = GameEngine::new(GameConfig::small());
        let state = engine.initialize();

        // Head plus the configured body count.
        assert_eq!(state.chain.len(), 3);
        assert_eq!(state.phase, GamePhase::NotStarted);
        assert_eq!(state.score, 0);
        assert_eq!(state.speed, 200.0);
        assert!(!state.boosting);
    }

    #[test]
    fn test_initialize_adopts_prewired_segments() {
        let mut engine = GameEngine::new(GameConfig::small());
        let state = engine.initialize_with(&[Some(vec2(0.0, 30.0)), None, Some(vec2(0.0, 10.0))]);

        // Two survive the filter, two more are synthesized.
        assert_eq!(state.chain.len(), 5);
    }

    #[test]
    fn test_head_relocated_within_margin() {
        let mut engine = GameEngine::new(GameConfig::small());
        for _ in 0..100 {
            let state = engine.initialize();
            let head = state.head_pos().unwrap();
            assert!(head.x.abs() <= 90.0);
            assert!(head.y.abs() <= 90.0);
        }
    }

    #[test]
    fn test_food_spawns_in_bounds() {
        let mut engine = GameEngine::new(GameConfig::small());
        for _ in 0..100 {
            let state = engine.initialize();
            assert!(state.is_in_bounds(state.food.pos));
        }
    }

    #[test]
    fn test_tick_is_exact_integration() {
        let (mut engine, mut state) = running_engine();
        let before = state.head_pos().unwrap();

        engine.tick(&mut state, vec2(1.0, 0.0), 0.05);

        let expected = before + vec2(1.0, 0.0) * 200.0 * 0.05;
        assert_eq!(state.head_pos(), Some(expected));
    }

    #[test]
    fn test_tick_before_start_is_noop() {
        let mut engine = GameEngine::new(GameConfig::small());
        let mut state = engine.initialize();
        let before = state.head_pos();

        engine.tick(&mut state, vec2(1.0, 0.0), 0.1);
        assert_eq!(state.head_pos(), before);
    }

    #[test]
    fn test_directional_inertia() {
        let (mut engine, mut state) = running_engine();
        engine.tick(&mut state, vec2(1.0, 0.0), 0.1);

        // Idle input keeps the snake on its last commanded heading.
        for _ in 0..3 {
            let before = state.head_pos().unwrap();
            engine.tick(&mut state, Vec2::ZERO, 0.1);
            assert_eq!(
                state.head_pos(),
                Some(before + vec2(1.0, 0.0) * 200.0 * 0.1)
            );
        }
        assert_eq!(state.last_dir, vec2(1.0, 0.0));
    }

    #[test]
    fn test_facing_follows_commanded_heading() {
        let (mut engine, mut state) = running_engine();
        engine.tick(&mut state, vec2(0.0, 1.0), 0.01);
        assert!((state.facing - std::f32::consts::FRAC_PI_2).abs() < 1e-5);

        // Neutral input leaves the facing alone.
        let facing = state.facing;
        engine.tick(&mut state, Vec2::ZERO, 0.01);
        assert_eq!(state.facing, facing);
    }

    #[test]
    fn test_eating_grows_scores_and_respawns() {
        let (mut engine, mut state) = running_engine();
        let len = state.chain.len();
        let old_food = state.food;

        engine.on_contact(&mut state, Contact::Food { id: old_food.id });

        assert_eq!(state.score, 1);
        assert_eq!(state.chain.len(), len + 1);
        assert_ne!(state.food.id, old_food.id);
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn test_duplicate_food_contact_is_ignored() {
        let (mut engine, mut state) = running_engine();
        let id = state.food.id;

        engine.on_contact(&mut state, Contact::Food { id });
        engine.on_contact(&mut state, Contact::Food { id });

        assert_eq!(state.score, 1);
        assert_eq!(state.chain.len(), 4);
    }

    #[test]
    fn test_obstacle_contact_ends_game() {
        let (mut engine, mut state) = running_engine();
        engine.on_contact(&mut state, Contact::Obstacle);
        assert_eq!(state.phase, GamePhase::GameOver);

        // Simulation is frozen: neither motion nor scoring continues.
        let head = state.head_pos();
        engine.tick(&mut state, vec2(1.0, 0.0), 0.1);
        assert_eq!(state.head_pos(), head);

        let id = state.food.id;
        engine.on_contact(&mut state, Contact::Food { id });
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_boost_is_idempotent() {
        let (mut engine, mut state) = running_engine();

        engine.set_boost(&mut state, true);
        engine.set_boost(&mut state, true);
        assert_eq!(state.speed, 250.0);
        assert!(state.boosting);

        engine.set_boost(&mut state, false);
        assert_eq!(state.speed, 200.0);
        assert!(!state.boosting);
    }

    #[test]
    fn test_follow_tick_only_runs_while_running() {
        let mut engine = GameEngine::new(GameConfig::small());
        let mut state = engine.initialize();
        let before: Vec<Vec2> = state.chain.segments().map(|(p, _)| p).collect();

        engine.follow_tick(&mut state);
        let after: Vec<Vec2> = state.chain.segments().map(|(p, _)| p).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_example_round() {
        // Two body segments, one meal, one crash.
        let (mut engine, mut state) = running_engine();
        assert_eq!(state.chain.len(), 3);

        let id = state.food.id;
        engine.on_contact(&mut state, Contact::Food { id });
        assert_eq!(state.chain.len(), 4);
        assert_eq!(state.score, 1);

        engine.on_contact(&mut state, Contact::Obstacle);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.score, 1);
    }
}
