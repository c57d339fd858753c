use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Configuration for the game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Width of the play area in world units
    pub arena_width: f32,
    /// Height of the play area in world units
    pub arena_height: f32,
    /// Number of body segments the snake starts with
    pub initial_body_count: usize,
    /// Distance between neighbouring segments
    pub segment_spacing: f32,
    /// Head speed in world units per second
    pub base_speed: f32,
    /// Speed added on top of the base while boost is held
    pub boost_bonus: f32,
    /// Period of the body follow tick in seconds
    pub follow_period: f32,
    /// Where the head sits before it is relocated to a random position
    pub head_start: Vec2,
    /// Head-to-target distance that counts as a contact
    pub contact_radius: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            arena_width: 800.0,
            arena_height: 480.0,
            initial_body_count: 2,
            segment_spacing: 50.0,
            base_speed: 200.0,
            boost_bonus: 50.0,
            follow_period: 0.2,
            head_start: Vec2::new(0.0, 100.0),
            contact_radius: 25.0,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with a custom play-area size
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            arena_width: width,
            arena_height: height,
            ..Default::default()
        }
    }

    /// Override the number of body segments the snake starts with
    pub fn with_initial_body_count(mut self, count: usize) -> Self {
        self.initial_body_count = count;
        self
    }

    /// Create a small play area for testing
    pub fn small() -> Self {
        Self {
            arena_width: 200.0,
            arena_height: 200.0,
            segment_spacing: 20.0,
            contact_radius: 10.0,
            head_start: Vec2::new(0.0, 50.0),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.base_speed, 200.0);
        assert_eq!(config.boost_bonus, 50.0);
        assert_eq!(config.follow_period, 0.2);
        assert_eq!(config.initial_body_count, 2);
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(640.0, 360.0).with_initial_body_count(5);
        assert_eq!(config.arena_width, 640.0);
        assert_eq!(config.arena_height, 360.0);
        assert_eq!(config.initial_body_count, 5);
    }
}
