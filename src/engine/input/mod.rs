// Input handling system
//
// - `action`: game actions and default key bindings
// - `config`: key remapping
// - `player`: held keys and per-tick press/release edges
//
// Feed key events with `PlayerInput::handle_key`, build a `MovementIntent`
// from the input for the tick, then call `PlayerInput::update`.

pub mod action;
pub mod config;
pub mod player;

// Re-export commonly used types
pub use action::{default_bindings, Action};
pub use config::InputConfig;
pub use player::PlayerInput;
