// Movement/animation controller
//
// Turns per-tick physics feedback into facing, ladder physics and texture
// selection. One controller per character; the host loop calls it once per
// simulation step, after the physics engine has moved the body.

use log::debug;

use super::animation::{TextureHandle, TextureTable};
use super::config::{ConfigError, MovementConfig};
use super::state::{classify, AnimationState, CharacterState, Facing};
use crate::core::{BodyProfile, PhysicsBody};

/// What the physics engine reports after moving a character's body
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StepFeedback {
    /// Horizontal displacement this tick
    pub dx: f32,
    /// Vertical displacement this tick (positive is up)
    pub dy: f32,
    /// Rotation change this tick; characters are rotation locked so it is ignored
    pub d_angle: f32,
    /// Whether the body is standing on something
    pub on_ground: bool,
    /// Number of ladder volumes overlapping the body
    pub ladder_overlaps: usize,
}

/// Ladder grab/release, reported on the tick it happens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LadderEdge {
    Entered,
    Left,
}

/// Body profiles swapped when grabbing or releasing a ladder
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LadderProfiles {
    pub normal: BodyProfile,
    pub ladder: BodyProfile,
}

/// Result of one controller step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepOutcome {
    /// Animation chosen this tick, `None` if nothing applied
    pub animation: Option<AnimationState>,
    /// Texture to draw
    pub texture: TextureHandle,
    /// Whether a walk or climb frame advanced this tick
    pub frame_advanced: bool,
    /// Ladder edge crossed this tick, if any
    pub ladder: Option<LadderEdge>,
    pub facing_changed: bool,
}

/// Drives one character's facing, ladder physics and texture
#[derive(Debug, Clone)]
pub struct MovementAnimationController {
    config: MovementConfig,
    textures: TextureTable,
    profiles: LadderProfiles,
    state: CharacterState,
    texture: TextureHandle,
    // Edges seen by `begin_step`, reported by `finish_step`
    pending_ladder: Option<LadderEdge>,
    pending_facing: bool,
}

impl MovementAnimationController {
    /// Create a controller; fails if `config` is unusable
    pub fn new(
        config: MovementConfig,
        textures: TextureTable,
        profiles: LadderProfiles,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let state = CharacterState::new();
        let texture = textures.idle(state.facing);

        Ok(Self {
            config,
            textures,
            profiles,
            state,
            texture,
            pending_ladder: None,
            pending_facing: false,
        })
    }

    pub fn state(&self) -> &CharacterState {
        &self.state
    }

    pub fn config(&self) -> &MovementConfig {
        &self.config
    }

    /// Texture the renderer should draw
    pub fn texture(&self) -> TextureHandle {
        self.texture
    }

    pub fn facing(&self) -> Facing {
        self.state.facing
    }

    pub fn is_on_ground(&self) -> bool {
        self.state.is_on_ground
    }

    pub fn is_on_ladder(&self) -> bool {
        self.state.is_on_ladder
    }

    /// Run a full tick: facing, ladder, ground, odometers, animation
    pub fn on_physics_step<B: PhysicsBody + ?Sized>(
        &mut self,
        feedback: &StepFeedback,
        body: &mut B,
    ) -> StepOutcome {
        self.begin_step(feedback, body);
        self.finish_step(feedback)
    }

    /// First half of a tick: update facing and ladder state.
    ///
    /// The body is reconfigured only when the ladder state flips.
    pub fn begin_step<B: PhysicsBody + ?Sized>(&mut self, feedback: &StepFeedback, body: &mut B) {
        self.pending_facing = self.state.update_facing(feedback.dx, self.config.dead_zone_x);
        if self.pending_facing {
            debug!("Facing {:?}", self.state.facing);
        }

        let on_ladder = feedback.ladder_overlaps > 0;
        self.pending_ladder = match (self.state.is_on_ladder, on_ladder) {
            (false, true) => {
                body.apply_profile(&self.profiles.ladder);
                debug!("Grabbed ladder");
                Some(LadderEdge::Entered)
            }
            (true, false) => {
                body.apply_profile(&self.profiles.normal);
                debug!("Released ladder");
                Some(LadderEdge::Left)
            }
            _ => None,
        };
        self.state.is_on_ladder = on_ladder;
    }

    /// Second half of a tick: ground contact, odometers and texture choice
    pub fn finish_step(&mut self, feedback: &StepFeedback) -> StepOutcome {
        self.state.is_on_ground = feedback.on_ground;
        self.state.accumulate(feedback.dx, feedback.dy);

        let animation = classify(
            self.state.is_on_ground,
            self.state.is_on_ladder,
            feedback.dx,
            feedback.dy,
            self.config.dead_zone_x,
            self.config.dead_zone_y,
        );

        let mut frame_advanced = false;
        if let Some(animation) = animation {
            frame_advanced = self.select_texture(animation);
            self.state.animation = animation;
        }

        StepOutcome {
            animation,
            texture: self.texture,
            frame_advanced,
            ladder: self.pending_ladder.take(),
            facing_changed: std::mem::take(&mut self.pending_facing),
        }
    }

    /// Swap the texture for `animation`; returns true if a frame advanced
    fn select_texture(&mut self, animation: AnimationState) -> bool {
        let facing = self.state.facing;
        match animation {
            AnimationState::Climbing => {
                let advanced = self.state.advance_climb(
                    self.config.climb_distance_threshold,
                    self.config.climb_frame_count,
                );
                if advanced {
                    if let Some(texture) = self.textures.climb(self.state.climb_frame) {
                        self.texture = texture;
                    }
                }
                advanced
            }
            AnimationState::Jumping => {
                if let Some(texture) = self.textures.jump(facing) {
                    self.texture = texture;
                }
                false
            }
            AnimationState::Falling => {
                if let Some(texture) = self.textures.fall(facing) {
                    self.texture = texture;
                }
                false
            }
            AnimationState::Idle => {
                self.texture = self.textures.idle(facing);
                false
            }
            AnimationState::Walking => {
                let advanced = self.state.advance_walk(
                    self.config.walk_distance_threshold,
                    self.config.walk_frame_count,
                );
                if advanced {
                    if let Some(texture) = self.textures.walk(self.state.walk_frame, facing) {
                        self.texture = texture;
                    }
                }
                advanced
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut CharacterState {
        &mut self.state
    }
}
