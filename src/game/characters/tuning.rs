// Physics tuning - forces, speeds and damping for the player body
// Units are pixels and seconds; the world is y-up.

use glam::Vec2;

use super::config::ConfigError;
use crate::core::BodyProfile;

/// Physics constants for the player and the level it moves through
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerTuning {
    // World
    /// Downward acceleration (positive number)
    pub gravity: f32,
    /// Fraction of velocity kept per second in normal movement
    pub damping_default: f32,
    /// Fraction of velocity kept per second while on a ladder
    pub damping_ladder: f32,

    // Body
    /// Player mass
    pub mass: f32,
    /// Player friction when gripping or standing still
    pub friction: f32,
    /// Friction of static walls and platforms
    pub friction_wall: f32,
    /// Friction of pushable items
    pub friction_dynamic_item: f32,

    // Movement
    /// Horizontal speed cap
    pub max_speed_x: f32,
    /// Vertical speed cap off ladders
    pub max_speed_y: f32,
    /// Move force on ground or ladder
    pub move_force_ground: f32,
    /// Move force while airborne
    pub move_force_air: f32,
    /// One-shot upward impulse of a jump
    pub jump_impulse: f32,
}

/// Tuning of the demo level
pub const BASE_TUNING: PlayerTuning = PlayerTuning {
    gravity: 1500.0,
    damping_default: 1.0,
    damping_ladder: 0.0001,

    mass: 2.0,
    friction: 1.0,
    friction_wall: 0.7,
    friction_dynamic_item: 0.6,

    max_speed_x: 450.0,
    max_speed_y: 1600.0,
    move_force_ground: 8000.0,
    move_force_air: 900.0,
    jump_impulse: 1500.0 - 300.0,
};

impl Default for PlayerTuning {
    fn default() -> Self {
        BASE_TUNING
    }
}

impl PlayerTuning {
    /// Body parameters while running, jumping and falling
    pub fn normal_profile(&self) -> BodyProfile {
        BodyProfile {
            gravity: Vec2::new(0.0, -self.gravity),
            damping: self.damping_default,
            max_horizontal_speed: self.max_speed_x,
            max_vertical_speed: self.max_speed_y,
        }
    }

    /// Body parameters while holding a ladder: no gravity, heavy damping and
    /// the vertical speed capped like the horizontal one
    pub fn ladder_profile(&self) -> BodyProfile {
        BodyProfile {
            gravity: Vec2::ZERO,
            damping: self.damping_ladder,
            max_horizontal_speed: self.max_speed_x,
            max_vertical_speed: self.max_speed_x,
        }
    }

    /// Reject values the physics body could not sensibly use
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("mass", self.mass),
            ("max_speed_x", self.max_speed_x),
            ("max_speed_y", self.max_speed_y),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::InvalidTuning(format!(
                    "{name} must be positive (got {value})"
                )));
            }
        }

        let damping = [
            ("damping_default", self.damping_default),
            ("damping_ladder", self.damping_ladder),
        ];
        for (name, value) in damping {
            if !(value > 0.0 && value <= 1.0) {
                return Err(ConfigError::InvalidTuning(format!(
                    "{name} must be in (0, 1] (got {value})"
                )));
            }
        }

        Ok(())
    }
}
