// Per-tick input state for the local player

use super::action::Action;
use super::config::InputConfig;
use std::collections::{HashMap, HashSet};
use winit::keyboard::KeyCode;

/// Held keys plus the press/release edges of the current tick
#[derive(Debug, Default)]
pub struct PlayerInput {
    /// Keys currently down, so OS key repeats are not counted twice
    held_keys: HashSet<KeyCode>,

    /// Number of sources holding each action
    holds: HashMap<Action, usize>,

    /// Actions that are currently pressed
    pressed: HashSet<Action>,

    /// Actions that went down since the last `update`
    just_pressed: HashSet<Action>,

    /// Actions that went up since the last `update`
    just_released: HashSet<Action>,
}

impl PlayerInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if an action is currently pressed
    pub fn is_pressed(&self, action: Action) -> bool {
        self.pressed.contains(&action)
    }

    /// Check if an action was just pressed this tick
    pub fn just_pressed(&self, action: Action) -> bool {
        self.just_pressed.contains(&action)
    }

    /// Check if an action was just released this tick
    pub fn just_released(&self, action: Action) -> bool {
        self.just_released.contains(&action)
    }

    /// Feed a key event through the bindings. Returns the action it maps to.
    ///
    /// An action bound to several keys stays pressed until the last of them
    /// goes up.
    pub fn handle_key(&mut self, config: &InputConfig, key: KeyCode, pressed: bool) -> Option<Action> {
        let action = config.action(key)?;
        if pressed {
            if self.held_keys.insert(key) {
                self.press(action);
            }
        } else if self.held_keys.remove(&key) {
            self.release(action);
        }
        Some(action)
    }

    /// Register one source pressing an action
    pub fn press(&mut self, action: Action) {
        *self.holds.entry(action).or_insert(0) += 1;
        if self.pressed.insert(action) {
            self.just_pressed.insert(action);
        }
    }

    /// Register one source letting go of an action
    pub fn release(&mut self, action: Action) {
        let Some(count) = self.holds.get_mut(&action) else {
            return;
        };
        *count -= 1;
        if *count == 0 {
            self.holds.remove(&action);
            self.pressed.remove(&action);
            self.just_released.insert(action);
        }
    }

    /// Clear the edges. Call once per tick after the input has been consumed.
    pub fn update(&mut self) {
        self.just_pressed.clear();
        self.just_released.clear();
    }

    /// Reset all input state
    pub fn reset(&mut self) {
        self.held_keys.clear();
        self.holds.clear();
        self.pressed.clear();
        self.just_pressed.clear();
        self.just_released.clear();
    }

    /// Get all currently pressed actions
    pub fn pressed_actions(&self) -> Vec<Action> {
        self.pressed.iter().copied().collect()
    }
}
