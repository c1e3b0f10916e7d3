// Game action definitions and default key bindings

use winit::keyboard::KeyCode;

/// Represents all possible in-game actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Movement
    MoveLeft,
    MoveRight,
    /// Jump on the ground, climb on a ladder
    MoveUp,
    /// Climb down a ladder
    MoveDown,

    // Meta actions
    Pause,
    Reset,
}

impl Action {
    /// Check if this is one of the four movement directions
    pub fn is_movement(self) -> bool {
        matches!(
            self,
            Action::MoveLeft | Action::MoveRight | Action::MoveUp | Action::MoveDown
        )
    }
}

/// Default keyboard bindings: arrow keys and WASD both move
pub fn default_bindings() -> Vec<(KeyCode, Action)> {
    vec![
        (KeyCode::ArrowLeft, Action::MoveLeft),
        (KeyCode::ArrowRight, Action::MoveRight),
        (KeyCode::ArrowUp, Action::MoveUp),
        (KeyCode::ArrowDown, Action::MoveDown),
        (KeyCode::KeyA, Action::MoveLeft),
        (KeyCode::KeyD, Action::MoveRight),
        (KeyCode::KeyW, Action::MoveUp),
        (KeyCode::KeyS, Action::MoveDown),
        (KeyCode::KeyP, Action::Pause),
        (KeyCode::KeyR, Action::Reset),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_movement_actions() {
        assert!(Action::MoveUp.is_movement());
        assert!(Action::MoveDown.is_movement());
        assert!(!Action::Pause.is_movement());
        assert!(!Action::Reset.is_movement());
    }

    #[test]
    fn test_every_action_has_a_default_key() {
        let bound: HashSet<Action> = default_bindings().into_iter().map(|(_, a)| a).collect();
        for action in [
            Action::MoveLeft,
            Action::MoveRight,
            Action::MoveUp,
            Action::MoveDown,
            Action::Pause,
            Action::Reset,
        ] {
            assert!(bound.contains(&action), "{action:?} has no default key");
        }
    }

    #[test]
    fn test_no_duplicate_keys() {
        let mut seen = HashSet::new();
        for (key, _) in default_bindings() {
            assert!(seen.insert(key), "Duplicate key {key:?} in default bindings");
        }
    }
}
