// Input-to-force resolution for the player body

use glam::Vec2;

use super::tuning::PlayerTuning;
use crate::core::math::axis;
use crate::core::PhysicsBody;
use crate::engine::input::{Action, PlayerInput};

/// Movement keys held this tick.
///
/// `jump` is the up key's press edge: true only on the tick the key went
/// down, so holding it never re-triggers the impulse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MovementIntent {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub jump: bool,
}

impl MovementIntent {
    /// -1 (left), 0 or 1 (right); opposing keys cancel
    pub fn horizontal(&self) -> f32 {
        axis(self.left, self.right)
    }

    /// -1 (down), 0 or 1 (up); opposing keys cancel
    pub fn vertical(&self) -> f32 {
        axis(self.down, self.up)
    }

    /// Check if any movement direction is held once opposing keys cancel
    pub fn any_held(&self) -> bool {
        self.horizontal() != 0.0 || self.vertical() != 0.0
    }

    /// Snapshot the movement keys of the current tick
    pub fn from_input(input: &PlayerInput) -> Self {
        Self {
            left: input.is_pressed(Action::MoveLeft),
            right: input.is_pressed(Action::MoveRight),
            up: input.is_pressed(Action::MoveUp),
            down: input.is_pressed(Action::MoveDown),
            jump: input.just_pressed(Action::MoveUp),
        }
    }
}

/// What to do to the player body before the next physics step
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ForceCommand {
    /// Continuous force for the next step
    pub force: Vec2,
    /// One-shot impulse (jump)
    pub impulse: Option<Vec2>,
    /// New friction coefficient, `None` leaves it alone
    pub friction: Option<f32>,
}

impl ForceCommand {
    /// Push this command into a physics body
    pub fn apply<B: PhysicsBody + ?Sized>(&self, body: &mut B) {
        if let Some(friction) = self.friction {
            body.set_friction(friction);
        }
        if self.force != Vec2::ZERO {
            body.apply_force(self.force);
        }
        if let Some(impulse) = self.impulse {
            body.apply_impulse(impulse);
        }
    }
}

/// Turn held keys plus ground/ladder contact into a force command.
///
/// Horizontal input drives with full force when the feet (or hands) have
/// something to push against and with reduced force in the air. Up jumps
/// from solid ground and climbs on a ladder; down only climbs.
pub fn resolve_forces(
    intent: &MovementIntent,
    on_ground: bool,
    on_ladder: bool,
    tuning: &PlayerTuning,
) -> ForceCommand {
    let mut command = ForceCommand::default();

    if !intent.any_held() {
        command.friction = Some(tuning.friction);
        return command;
    }

    let horizontal = intent.horizontal();
    if horizontal != 0.0 {
        let magnitude = if on_ground || on_ladder {
            tuning.move_force_ground
        } else {
            tuning.move_force_air
        };
        command.force.x = horizontal * magnitude;
        // Let the drive force act without the feet sticking to the floor
        command.friction = Some(0.0);
    }

    let vertical = intent.vertical();
    if on_ladder && vertical != 0.0 {
        command.force.y = vertical * tuning.move_force_ground;
        command.friction = Some(tuning.friction);
    } else if vertical > 0.0 && intent.jump && on_ground {
        command.impulse = Some(Vec2::new(0.0, tuning.jump_impulse));
    }

    command
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::body::testing::{BodyCall, RecordingBody};

    fn tuning() -> PlayerTuning {
        PlayerTuning::default()
    }

    #[test]
    fn test_intent_from_input() {
        let mut input = PlayerInput::new();
        input.press(Action::MoveUp);
        input.press(Action::MoveLeft);

        let intent = MovementIntent::from_input(&input);
        assert!(intent.left && intent.up && intent.jump);
        assert!(!intent.right && !intent.down);

        input.update();
        let held = MovementIntent::from_input(&input);
        assert!(held.up);
        assert!(!held.jump);
    }

    #[test]
    fn test_no_input_brakes() {
        let command = resolve_forces(&MovementIntent::default(), true, false, &tuning());
        assert_eq!(command.force, Vec2::ZERO);
        assert_eq!(command.impulse, None);
        assert_eq!(command.friction, Some(1.0));
    }

    #[test]
    fn test_ground_and_air_force() {
        let right = MovementIntent {
            right: true,
            ..MovementIntent::default()
        };
        let on_ground = resolve_forces(&right, true, false, &tuning());
        assert_eq!(on_ground.force, Vec2::new(8000.0, 0.0));
        assert_eq!(on_ground.friction, Some(0.0));

        let left = MovementIntent {
            left: true,
            ..MovementIntent::default()
        };
        let in_air = resolve_forces(&left, false, false, &tuning());
        assert_eq!(in_air.force, Vec2::new(-900.0, 0.0));
    }

    #[test]
    fn test_ladder_counts_as_footing() {
        let left = MovementIntent {
            left: true,
            ..MovementIntent::default()
        };
        let command = resolve_forces(&left, false, true, &tuning());
        assert_eq!(command.force.x, -8000.0);
    }

    #[test]
    fn test_opposing_keys_cancel() {
        let both = MovementIntent {
            left: true,
            right: true,
            ..MovementIntent::default()
        };
        assert!(!both.any_held());
        let command = resolve_forces(&both, true, false, &tuning());
        assert_eq!(command.force, Vec2::ZERO);
        assert_eq!(command.friction, Some(1.0));

        let up_down = MovementIntent {
            up: true,
            down: true,
            jump: true,
            ..MovementIntent::default()
        };
        let command = resolve_forces(&up_down, true, false, &tuning());
        assert_eq!(command.impulse, None);
        let command = resolve_forces(&up_down, false, true, &tuning());
        assert_eq!(command.force, Vec2::ZERO);
        assert_eq!(command.friction, Some(1.0));
    }

    #[test]
    fn test_cancelled_keys_restore_friction_after_driving() {
        let mut body = RecordingBody::default();
        let right = MovementIntent {
            right: true,
            ..MovementIntent::default()
        };
        let both = MovementIntent {
            left: true,
            ..right
        };

        resolve_forces(&right, true, false, &tuning()).apply(&mut body);
        resolve_forces(&both, true, false, &tuning()).apply(&mut body);

        let frictions: Vec<f32> = body
            .calls
            .iter()
            .filter_map(|call| match call {
                BodyCall::Friction(friction) => Some(*friction),
                _ => None,
            })
            .collect();
        assert_eq!(frictions, vec![0.0, 1.0]);
    }

    #[test]
    fn test_jump_only_on_press_edge() {
        let pressed = MovementIntent {
            up: true,
            jump: true,
            ..MovementIntent::default()
        };
        let command = resolve_forces(&pressed, true, false, &tuning());
        assert_eq!(command.impulse, Some(Vec2::new(0.0, 1200.0)));
        assert_eq!(command.force, Vec2::ZERO);

        let held = MovementIntent {
            up: true,
            ..MovementIntent::default()
        };
        let command = resolve_forces(&held, true, false, &tuning());
        assert_eq!(command.impulse, None);
    }

    #[test]
    fn test_no_jump_in_air() {
        let pressed = MovementIntent {
            up: true,
            jump: true,
            ..MovementIntent::default()
        };
        let command = resolve_forces(&pressed, false, false, &tuning());
        assert_eq!(command.impulse, None);
    }

    #[test]
    fn test_climbing_grips() {
        let up = MovementIntent {
            up: true,
            jump: true,
            ..MovementIntent::default()
        };
        let command = resolve_forces(&up, true, true, &tuning());
        assert_eq!(command.force, Vec2::new(0.0, 8000.0));
        assert_eq!(command.impulse, None);
        assert_eq!(command.friction, Some(1.0));

        let down = MovementIntent {
            down: true,
            ..MovementIntent::default()
        };
        let command = resolve_forces(&down, false, true, &tuning());
        assert_eq!(command.force, Vec2::new(0.0, -8000.0));
        assert_eq!(command.friction, Some(1.0));
    }

    #[test]
    fn test_down_off_ladder_does_nothing() {
        let down = MovementIntent {
            down: true,
            ..MovementIntent::default()
        };
        let command = resolve_forces(&down, true, false, &tuning());
        assert_eq!(command, ForceCommand::default());
    }

    #[test]
    fn test_apply_order() {
        let command = ForceCommand {
            force: Vec2::new(10.0, 0.0),
            impulse: Some(Vec2::new(0.0, 5.0)),
            friction: Some(0.0),
        };
        let mut body = RecordingBody::default();
        command.apply(&mut body);

        assert_eq!(
            body.calls,
            vec![
                BodyCall::Friction(0.0),
                BodyCall::Force(Vec2::new(10.0, 0.0)),
                BodyCall::Impulse(Vec2::new(0.0, 5.0)),
            ]
        );
    }
}
