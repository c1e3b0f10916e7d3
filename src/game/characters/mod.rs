// Character system
//
// This module contains everything related to the characters in a level:
// - Per-tick state: facing, animation classification, odometers
// - Texture tables the renderer draws from
// - The movement/animation controller and its configuration
// - Input-to-force resolution for the player body
// - Player and enemy wrappers around the controller

pub mod animation;
pub mod config;
pub mod controller;
pub mod enemy;
pub mod forces;
pub mod player;
pub mod state;
pub mod tuning;

// Re-export commonly used types
pub use animation::{FacingPair, TextureHandle, TextureTable};
pub use config::{ConfigError, MovementConfig};
pub use controller::{LadderEdge, LadderProfiles, MovementAnimationController, StepFeedback, StepOutcome};
pub use enemy::Enemy;
pub use forces::{resolve_forces, ForceCommand, MovementIntent};
pub use player::Player;
pub use state::{AnimationState, CharacterState, Facing};
pub use tuning::{PlayerTuning, BASE_TUNING};
