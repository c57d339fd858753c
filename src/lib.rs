//! slither - a joystick-style snake arcade game for the terminal
//!
//! This library provides:
//! - Core simulation: head steering, body-chain follow, growth, contacts (game module)
//! - Keyboard joystick and boost control (input module)
//! - TUI rendering with the start and game-over panels (render module)
//! - The async game-loop driver (modes module)

pub mod game;
pub mod input;
pub mod logger;
pub mod metrics;
pub mod modes;
pub mod render;
