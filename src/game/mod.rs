//! Core simulation module
//!
//! All the movement, growth and contact logic without any I/O or rendering
//! dependency, so the whole game can be driven from unit tests.

pub mod chain;
pub mod config;
pub mod engine;
pub mod error;
pub mod state;

// Re-export commonly used types
pub use chain::{Segment, SegmentChain, SegmentId};
pub use config::GameConfig;
pub use engine::GameEngine;
pub use error::SimError;
pub use state::{Contact, Food, GamePhase, GameState};
