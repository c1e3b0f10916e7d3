// The player-controlled character

use super::animation::{TextureHandle, TextureTable};
use super::config::{ConfigError, MovementConfig};
use super::controller::{LadderProfiles, MovementAnimationController, StepFeedback, StepOutcome};
use super::forces::{resolve_forces, ForceCommand, MovementIntent};
use super::tuning::PlayerTuning;
use crate::core::PhysicsBody;
use crate::game::items::{resolve_collectibles, CollectibleKind, CollectibleSource, Scoreboard};

/// Player: movement/animation controller plus score
#[derive(Debug, Clone)]
pub struct Player {
    controller: MovementAnimationController,
    tuning: PlayerTuning,
    scoreboard: Scoreboard,
}

impl Player {
    /// Create a player with the full texture set; `scoreboard` tracks the
    /// level's collectibles
    pub fn new(
        config: MovementConfig,
        tuning: PlayerTuning,
        scoreboard: Scoreboard,
    ) -> Result<Self, ConfigError> {
        tuning.validate()?;
        let textures = TextureTable::sequential(&config)?;
        let profiles = LadderProfiles {
            normal: tuning.normal_profile(),
            ladder: tuning.ladder_profile(),
        };

        Ok(Self {
            controller: MovementAnimationController::new(config, textures, profiles)?,
            tuning,
            scoreboard,
        })
    }

    pub fn controller(&self) -> &MovementAnimationController {
        &self.controller
    }

    pub fn tuning(&self) -> &PlayerTuning {
        &self.tuning
    }

    pub fn scoreboard(&self) -> &Scoreboard {
        &self.scoreboard
    }

    pub fn score(&self) -> u32 {
        self.scoreboard.score()
    }

    pub fn texture(&self) -> TextureHandle {
        self.controller.texture()
    }

    /// Award points for something other than a pickup
    pub fn add_points(&mut self, points: u32) {
        self.scoreboard.add_points(points);
    }

    /// Forces for the next physics step, from the contact state of the last one
    pub fn resolve_forces(&self, intent: &MovementIntent) -> ForceCommand {
        resolve_forces(
            intent,
            self.controller.is_on_ground(),
            self.controller.is_on_ladder(),
            &self.tuning,
        )
    }

    /// Run a full tick against a body and a collectible source
    pub fn on_physics_step<B, S>(
        &mut self,
        feedback: &StepFeedback,
        body: &mut B,
        items: &mut S,
    ) -> (StepOutcome, Vec<CollectibleKind>)
    where
        B: PhysicsBody + ?Sized,
        S: CollectibleSource + ?Sized,
    {
        self.begin_step(feedback, body);
        let collected = self.collect(items);
        (self.finish_step(feedback), collected)
    }

    /// Facing and ladder state; see [`MovementAnimationController::begin_step`]
    pub fn begin_step<B: PhysicsBody + ?Sized>(&mut self, feedback: &StepFeedback, body: &mut B) {
        self.controller.begin_step(feedback, body);
    }

    /// Pick up whatever the player is touching
    pub fn collect<S: CollectibleSource + ?Sized>(&mut self, items: &mut S) -> Vec<CollectibleKind> {
        resolve_collectibles(&mut self.scoreboard, items)
    }

    /// Ground, odometers and texture; see [`MovementAnimationController::finish_step`]
    pub fn finish_step(&mut self, feedback: &StepFeedback) -> StepOutcome {
        self.controller.finish_step(feedback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::body::testing::RecordingBody;
    use crate::game::characters::state::AnimationState;
    use crate::game::items::testing::VecSource;

    fn player() -> Player {
        Player::new(
            MovementConfig::default(),
            PlayerTuning::default(),
            Scoreboard::from_items([CollectibleKind::Coin, CollectibleKind::Gem]),
        )
        .unwrap()
    }

    #[test]
    fn test_player_at_rest() {
        let mut player = player();
        let mut body = RecordingBody::default();
        let mut items = VecSource::default();
        let feedback = StepFeedback {
            on_ground: true,
            ..StepFeedback::default()
        };

        let (outcome, collected) = player.on_physics_step(&feedback, &mut body, &mut items);

        assert_eq!(outcome.animation, Some(AnimationState::Idle));
        assert!(collected.is_empty());
        assert!(body.calls.is_empty());
        assert_eq!(player.score(), 0);
    }

    #[test]
    fn test_pickup_across_two_ticks_counts_once() {
        let mut player = player();
        let mut body = RecordingBody::default();
        let mut items = VecSource {
            items: vec![Some(CollectibleKind::Coin), Some(CollectibleKind::Gem)],
            touching: vec![0],
            stale_overlaps: true,
        };
        let feedback = StepFeedback::default();

        let (_, first) = player.on_physics_step(&feedback, &mut body, &mut items);
        let (_, second) = player.on_physics_step(&feedback, &mut body, &mut items);

        assert_eq!(first, vec![CollectibleKind::Coin]);
        assert!(second.is_empty());
        assert_eq!(player.score(), 10);
        assert_eq!(player.scoreboard().remaining(CollectibleKind::Coin), 0);
        assert_eq!(player.scoreboard().remaining(CollectibleKind::Gem), 1);
    }

    #[test]
    fn test_forces_use_last_contact_state() {
        let mut player = player();
        let mut body = RecordingBody::default();
        let jump = MovementIntent {
            up: true,
            jump: true,
            ..MovementIntent::default()
        };

        // Airborne: no jump yet
        assert_eq!(player.resolve_forces(&jump).impulse, None);

        let landed = StepFeedback {
            on_ground: true,
            ..StepFeedback::default()
        };
        player.on_physics_step(&landed, &mut body, &mut VecSource::default());
        assert!(player.resolve_forces(&jump).impulse.is_some());
    }

    #[test]
    fn test_invalid_tuning_rejected() {
        let tuning = PlayerTuning {
            mass: 0.0,
            ..PlayerTuning::default()
        };
        let result = Player::new(MovementConfig::default(), tuning, Scoreboard::new());
        assert!(matches!(result, Err(ConfigError::InvalidTuning(_))));
    }
}
