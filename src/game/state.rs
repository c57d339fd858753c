use glam::Vec2;

use super::chain::SegmentChain;

/// Where the session is in its lifecycle.
///
/// `GameOver` is the only terminal state for player control; leaving it means
/// rebuilding the whole state from config, there is no soft reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    NotStarted,
    Running,
    GameOver,
}

/// Contact report from the collision check, tagged by a closed class instead
/// of the numeric collider groups the original scene used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// The head touched the live food item. The id names the instance so a
    /// contact reported more than once cannot be consumed twice.
    Food { id: u64 },
    /// The head touched something lethal.
    Obstacle,
}

/// The single consumable on the field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Food {
    /// Monotonically increasing instance id.
    pub id: u64,
    pub pos: Vec2,
    /// Uniformly random RGB, one channel each.
    pub color: (u8, u8, u8),
}

/// Complete game state, mutated only by the engine.
#[derive(Debug, Clone)]
pub struct GameState {
    pub chain: SegmentChain,
    pub food: Food,
    pub phase: GamePhase,
    pub score: u32,
    /// Current head speed; reassigned wholesale by the boost control.
    pub speed: f32,
    pub boosting: bool,
    /// Last nonzero commanded direction, reused while input is neutral.
    pub last_dir: Vec2,
    /// Head facing in radians from the +X axis.
    pub facing: f32,
    pub arena_width: f32,
    pub arena_height: f32,
}

impl GameState {
    pub fn head_pos(&self) -> Option<Vec2> {
        self.chain.head_pos()
    }

    /// Half width and half height of the centered play area.
    pub fn half_extents(&self) -> (f32, f32) {
        (self.arena_width / 2.0, self.arena_height / 2.0)
    }

    pub fn is_in_bounds(&self, pos: Vec2) -> bool {
        let (hw, hh) = self.half_extents();
        pos.x.abs() <= hw && pos.y.abs() <= hh
    }
}
