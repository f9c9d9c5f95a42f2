//! Keyboard mapping
//!
//! Keys are matched on `KeyboardEvent.code`, so the layout does not matter:
//! WASD sits where it physically is.

use crate::sim::Intent;

/// What a key does, independent of press or release
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Left,
    Right,
    Jump,
    Interact,
    /// Toggle the demo autopilot
    Autopilot,
}

pub fn action_for_code(code: &str) -> Option<KeyAction> {
    match code {
        "ArrowLeft" | "KeyA" => Some(KeyAction::Left),
        "ArrowRight" | "KeyD" => Some(KeyAction::Right),
        "ArrowUp" | "Space" | "KeyW" => Some(KeyAction::Jump),
        "Enter" => Some(KeyAction::Interact),
        "KeyI" => Some(KeyAction::Autopilot),
        _ => None,
    }
}

/// Session intent for a key transition
///
/// Jump and interact fire on press only; movement latches on press and
/// clears on release. The autopilot toggle is handled by the host.
pub fn intent_for_key(code: &str, pressed: bool) -> Option<Intent> {
    match action_for_code(code)? {
        KeyAction::Left => Some(Intent::MoveLeft(pressed)),
        KeyAction::Right => Some(Intent::MoveRight(pressed)),
        KeyAction::Jump if pressed => Some(Intent::Jump),
        KeyAction::Interact if pressed => Some(Intent::Interact),
        _ => None,
    }
}

/// Whether the browser's default action should be suppressed (page scroll)
pub fn captures_key(code: &str) -> bool {
    matches!(
        action_for_code(code),
        Some(KeyAction::Left | KeyAction::Right | KeyAction::Jump)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movement_keys_latch_and_release() {
        assert_eq!(intent_for_key("ArrowLeft", true), Some(Intent::MoveLeft(true)));
        assert_eq!(intent_for_key("KeyA", false), Some(Intent::MoveLeft(false)));
        assert_eq!(intent_for_key("KeyD", true), Some(Intent::MoveRight(true)));
        assert_eq!(intent_for_key("ArrowRight", false), Some(Intent::MoveRight(false)));
    }

    #[test]
    fn test_jump_keys_fire_on_press_only() {
        for code in ["ArrowUp", "Space", "KeyW"] {
            assert_eq!(intent_for_key(code, true), Some(Intent::Jump));
            assert_eq!(intent_for_key(code, false), None);
        }
    }

    #[test]
    fn test_enter_interacts() {
        assert_eq!(intent_for_key("Enter", true), Some(Intent::Interact));
        assert_eq!(intent_for_key("Enter", false), None);
    }

    #[test]
    fn test_unbound_and_host_keys() {
        assert_eq!(intent_for_key("KeyQ", true), None);
        assert_eq!(intent_for_key("KeyI", true), None);
        assert_eq!(action_for_code("KeyI"), Some(KeyAction::Autopilot));
    }

    #[test]
    fn test_captures_key() {
        assert!(captures_key("Space"));
        assert!(captures_key("ArrowLeft"));
        assert!(!captures_key("Enter"));
        assert!(!captures_key("Tab"));
    }
}
