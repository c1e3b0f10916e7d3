// Patrolling enemies

use glam::Vec2;
use log::info;

use super::animation::{TextureHandle, TextureTable};
use super::config::{ConfigError, MovementConfig};
use super::controller::{LadderProfiles, MovementAnimationController, StepFeedback, StepOutcome};
use super::tuning::PlayerTuning;
use crate::core::PhysicsBody;
use crate::game::platforms::{reverse_at_boundaries, Boundaries, Extents};

/// Default hit points of an enemy
pub const ENEMY_HEALTH: i32 = 1;

/// Default points awarded for defeating an enemy
pub const ENEMY_POINTS: u32 = 50;

/// Horizontal force an enemy walks with
pub const ENEMY_MOVE_FORCE: f32 = 3000.0;

/// First texture handle used for enemy art
pub const ENEMY_TEXTURE_BASE: u32 = 1000;

/// A walking enemy that turns around at its patrol boundaries
#[derive(Debug, Clone)]
pub struct Enemy {
    controller: MovementAnimationController,
    health: i32,
    points: u32,
    patrol: Boundaries,
    /// -1.0 walking left, 1.0 walking right
    direction: f32,
}

impl Enemy {
    pub fn new(
        config: MovementConfig,
        tuning: &PlayerTuning,
        patrol: Boundaries,
    ) -> Result<Self, ConfigError> {
        tuning.validate()?;
        let textures = TextureTable::walker(&config, ENEMY_TEXTURE_BASE)?;
        // Enemies never touch ladders; both profiles are the normal one
        let profiles = LadderProfiles {
            normal: tuning.normal_profile(),
            ladder: tuning.normal_profile(),
        };

        Ok(Self {
            controller: MovementAnimationController::new(config, textures, profiles)?,
            health: ENEMY_HEALTH,
            points: ENEMY_POINTS,
            patrol,
            direction: 1.0,
        })
    }

    /// Override health and point value
    pub fn with_stats(mut self, health: i32, points: u32) -> Self {
        self.health = health;
        self.points = points;
        self
    }

    pub fn controller(&self) -> &MovementAnimationController {
        &self.controller
    }

    pub fn texture(&self) -> TextureHandle {
        self.controller.texture()
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn points(&self) -> u32 {
        self.points
    }

    pub fn direction(&self) -> f32 {
        self.direction
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Turn around when past a patrol boundary, then return the walk force
    pub fn patrol_force(&mut self, extents: &Extents) -> Vec2 {
        if !self.is_alive() {
            return Vec2::ZERO;
        }
        let heading = reverse_at_boundaries(&self.patrol, extents, Vec2::new(self.direction, 0.0));
        self.direction = heading.x;
        Vec2::new(self.direction * ENEMY_MOVE_FORCE, 0.0)
    }

    /// Apply damage. Returns true on the hit that defeats the enemy, never again after.
    pub fn take_damage(&mut self, damage: i32) -> bool {
        if !self.is_alive() {
            return false;
        }
        self.health = (self.health - damage).max(0);
        if self.health == 0 {
            info!("Enemy defeated (+{})", self.points);
            return true;
        }
        false
    }

    pub fn on_physics_step<B: PhysicsBody + ?Sized>(
        &mut self,
        feedback: &StepFeedback,
        body: &mut B,
    ) -> StepOutcome {
        self.controller.on_physics_step(feedback, body)
    }
}
