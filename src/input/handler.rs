use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use glam::{vec2, Vec2};

/// What a key event means to the game.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeyAction {
    /// Steer toward this unit vector for the current frame.
    Steer(Vec2),
    BoostPressed,
    BoostReleased,
    Start,
    Restart,
    Quit,
    None,
}

/// Keyboard stand-in for the joystick: direction keys produce steering
/// vectors, Space drives the boost control.
pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        // Release events only matter for the held boost control.
        if key.kind == KeyEventKind::Release {
            return match key.code {
                KeyCode::Char(' ') => KeyAction::BoostReleased,
                _ => KeyAction::None,
            };
        }

        match key.code {
            // Steering - arrow keys (world is y-up)
            KeyCode::Up => KeyAction::Steer(vec2(0.0, 1.0)),
            KeyCode::Down => KeyAction::Steer(vec2(0.0, -1.0)),
            KeyCode::Left => KeyAction::Steer(vec2(-1.0, 0.0)),
            KeyCode::Right => KeyAction::Steer(vec2(1.0, 0.0)),

            // Steering - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => KeyAction::Steer(vec2(0.0, 1.0)),
            KeyCode::Char('s') | KeyCode::Char('S') => KeyAction::Steer(vec2(0.0, -1.0)),
            KeyCode::Char('a') | KeyCode::Char('A') => KeyAction::Steer(vec2(-1.0, 0.0)),
            KeyCode::Char('d') | KeyCode::Char('D') => KeyAction::Steer(vec2(1.0, 0.0)),

            // Controls
            KeyCode::Char(' ') => KeyAction::BoostPressed,
            KeyCode::Enter => KeyAction::Start,
            KeyCode::Char('r') | KeyCode::Char('R') => KeyAction::Restart,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,

            _ => KeyAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn release(code: KeyCode) -> KeyEvent {
        let mut key = KeyEvent::new(code, KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        key
    }

    #[test]
    fn test_arrow_keys_steer() {
        let handler = InputHandler::new();

        assert_eq!(
            handler.handle_key_event(press(KeyCode::Up)),
            KeyAction::Steer(vec2(0.0, 1.0))
        );
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Down)),
            KeyAction::Steer(vec2(0.0, -1.0))
        );
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Left)),
            KeyAction::Steer(vec2(-1.0, 0.0))
        );
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Right)),
            KeyAction::Steer(vec2(1.0, 0.0))
        );
    }

    #[test]
    fn test_wasd_keys_steer() {
        let handler = InputHandler::new();

        assert_eq!(
            handler.handle_key_event(press(KeyCode::Char('w'))),
            KeyAction::Steer(vec2(0.0, 1.0))
        );
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Char('a'))),
            KeyAction::Steer(vec2(-1.0, 0.0))
        );
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Char('s'))),
            KeyAction::Steer(vec2(0.0, -1.0))
        );
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Char('d'))),
            KeyAction::Steer(vec2(1.0, 0.0))
        );
    }

    #[test]
    fn test_boost_press_and_release() {
        let handler = InputHandler::new();

        assert_eq!(
            handler.handle_key_event(press(KeyCode::Char(' '))),
            KeyAction::BoostPressed
        );
        assert_eq!(
            handler.handle_key_event(release(KeyCode::Char(' '))),
            KeyAction::BoostReleased
        );
    }

    #[test]
    fn test_release_of_other_keys_is_ignored() {
        let handler = InputHandler::new();
        assert_eq!(handler.handle_key_event(release(KeyCode::Up)), KeyAction::None);
        assert_eq!(
            handler.handle_key_event(release(KeyCode::Char('r'))),
            KeyAction::None
        );
    }

    #[test]
    fn test_control_keys() {
        let handler = InputHandler::new();

        assert_eq!(handler.handle_key_event(press(KeyCode::Enter)), KeyAction::Start);
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Char('r'))),
            KeyAction::Restart
        );
        assert_eq!(handler.handle_key_event(press(KeyCode::Char('q'))), KeyAction::Quit);
        assert_eq!(handler.handle_key_event(press(KeyCode::Esc)), KeyAction::Quit);
    }

    #[test]
    fn test_ctrl_c() {
        let handler = InputHandler::new();
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handler.handle_key_event(ctrl_c), KeyAction::Quit);
    }

    #[test]
    fn test_unknown_key() {
        let handler = InputHandler::new();
        assert_eq!(handler.handle_key_event(press(KeyCode::Char('x'))), KeyAction::None);
    }
}
