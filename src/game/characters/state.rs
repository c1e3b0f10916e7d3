// Character state: facing, animation classification and odometers

/// Direction the character's art is facing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// Index into a left/right texture pair (right first)
    pub fn index(self) -> usize {
        match self {
            Self::Right => 0,
            Self::Left => 1,
        }
    }
}

/// Represents the animation a character is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AnimationState {
    /// Standing still
    #[default]
    Idle,
    /// Moving horizontally on ground
    Walking,
    /// In the air, moving upward
    Jumping,
    /// In the air, moving downward
    Falling,
    /// Holding a ladder off the ground
    Climbing,
}

impl AnimationState {
    /// Check if the character is in the air
    pub fn is_airborne(&self) -> bool {
        matches!(self, Self::Jumping | Self::Falling)
    }

    /// Check if this state cycles frames with distance traveled
    pub fn is_cyclic(&self) -> bool {
        matches!(self, Self::Walking | Self::Climbing)
    }

    /// Get the animation name for this state
    pub fn animation_name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Walking => "walk",
            Self::Jumping => "jump",
            Self::Falling => "fall",
            Self::Climbing => "climb",
        }
    }
}

/// Pick the animation for one tick, first match wins:
/// climbing, then jumping/falling, then idle, then walking.
///
/// `None` means no animation applies this tick and the current art stays
/// (standing on the ground inside a ladder, or airborne with almost no
/// vertical motion over a ladder).
pub fn classify(
    on_ground: bool,
    on_ladder: bool,
    dx: f32,
    dy: f32,
    dead_zone_x: f32,
    dead_zone_y: f32,
) -> Option<AnimationState> {
    if on_ladder && !on_ground {
        return Some(AnimationState::Climbing);
    }

    if !on_ground && !on_ladder {
        if dy > dead_zone_y {
            return Some(AnimationState::Jumping);
        }
        if dy < -dead_zone_y {
            return Some(AnimationState::Falling);
        }
    }

    if on_ladder {
        return None;
    }

    if dx.abs() <= dead_zone_x {
        Some(AnimationState::Idle)
    } else {
        Some(AnimationState::Walking)
    }
}

/// Per-character state updated once per simulation tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CharacterState {
    pub facing: Facing,
    /// Last animation chosen by `classify`
    pub animation: AnimationState,
    pub walk_frame: usize,
    pub climb_frame: usize,
    /// Horizontal distance traveled since the last walk frame
    pub odometer_x: f32,
    /// Vertical distance traveled since the last climb frame
    pub odometer_y: f32,
    pub is_on_ladder: bool,
    pub is_on_ground: bool,
}

impl CharacterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Turn around once horizontal motion leaves the dead zone.
    /// Returns true if the facing changed.
    pub fn update_facing(&mut self, dx: f32, dead_zone: f32) -> bool {
        let next = if dx < -dead_zone {
            Facing::Left
        } else if dx > dead_zone {
            Facing::Right
        } else {
            return false;
        };

        if next == self.facing {
            return false;
        }
        self.facing = next;
        true
    }

    /// Accumulate distance traveled; direction reversals keep counting up
    pub fn accumulate(&mut self, dx: f32, dy: f32) {
        self.odometer_x += dx.abs();
        self.odometer_y += dy.abs();
    }

    /// Advance the walk frame if the odometer passed `threshold`.
    /// Returns true if the frame advanced.
    pub fn advance_walk(&mut self, threshold: f32, frame_count: usize) -> bool {
        if self.odometer_x <= threshold {
            return false;
        }
        self.odometer_x = 0.0;
        self.walk_frame = (self.walk_frame + 1) % frame_count;
        true
    }

    /// Advance the climb frame if the odometer passed `threshold`.
    /// Returns true if the frame advanced.
    pub fn advance_climb(&mut self, threshold: f32, frame_count: usize) -> bool {
        if self.odometer_y <= threshold {
            return false;
        }
        self.odometer_y = 0.0;
        self.climb_frame = (self.climb_frame + 1) % frame_count;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DZ: f32 = 5.0;

    #[test]
    fn test_initial_state() {
        let state = CharacterState::new();
        assert_eq!(state.facing, Facing::Right);
        assert_eq!(state.animation, AnimationState::Idle);
        assert_eq!(state.walk_frame, 0);
        assert!(!state.is_on_ladder);
    }

    #[test]
    fn test_facing_unchanged_inside_dead_zone() {
        for facing in [Facing::Left, Facing::Right] {
            for dx in [-DZ, -2.5, 0.0, 2.5, DZ] {
                let mut state = CharacterState {
                    facing,
                    ..CharacterState::default()
                };
                assert!(!state.update_facing(dx, DZ));
                assert_eq!(state.facing, facing);
            }
        }
    }

    #[test]
    fn test_facing_turns_left_and_stays() {
        let mut state = CharacterState::new();
        assert!(state.update_facing(-6.0, DZ));
        assert_eq!(state.facing, Facing::Left);

        assert!(!state.update_facing(-6.0, DZ));
        assert_eq!(state.facing, Facing::Left);
    }

    #[test]
    fn test_facing_turns_back_right() {
        let mut state = CharacterState {
            facing: Facing::Left,
            ..CharacterState::default()
        };
        assert!(state.update_facing(DZ + 0.1, DZ));
        assert_eq!(state.facing, Facing::Right);
    }

    #[test]
    fn test_classify_climbing_beats_jumping() {
        let state = classify(false, true, 0.0, 50.0, DZ, DZ);
        assert_eq!(state, Some(AnimationState::Climbing));
    }

    #[test]
    fn test_classify_airborne() {
        assert_eq!(
            classify(false, false, 0.0, 10.0, DZ, DZ),
            Some(AnimationState::Jumping)
        );
        assert_eq!(
            classify(false, false, 30.0, -40.0, DZ, DZ),
            Some(AnimationState::Falling)
        );
    }

    #[test]
    fn test_classify_hovering_falls_through_to_ground_rules() {
        // Apex of a jump: airborne but barely moving vertically
        assert_eq!(
            classify(false, false, 0.0, 1.0, DZ, DZ),
            Some(AnimationState::Idle)
        );
        assert_eq!(
            classify(false, false, 10.0, 1.0, DZ, DZ),
            Some(AnimationState::Walking)
        );
    }

    #[test]
    fn test_classify_ground() {
        assert_eq!(
            classify(true, false, 0.0, 0.0, DZ, DZ),
            Some(AnimationState::Idle)
        );
        assert_eq!(
            classify(true, false, -8.0, 0.0, DZ, DZ),
            Some(AnimationState::Walking)
        );
    }

    #[test]
    fn test_classify_ladder_on_ground_holds() {
        assert_eq!(classify(true, true, 0.0, 0.0, DZ, DZ), None);
        assert_eq!(classify(true, true, 12.0, 0.0, DZ, DZ), None);
    }

    #[test]
    fn test_odometer_counts_distance_not_displacement() {
        let mut state = CharacterState::new();
        state.accumulate(5.0, 0.0);
        state.accumulate(-5.0, 0.0);
        assert_eq!(state.odometer_x, 10.0);
    }

    #[test]
    fn test_walk_frame_advances_after_threshold() {
        let mut state = CharacterState::new();
        for step in 1..=5 {
            state.accumulate(5.0, 0.0);
            let advanced = state.advance_walk(20.0, 8);
            assert_eq!(advanced, step == 5, "step {step}");
        }
        assert_eq!(state.walk_frame, 1);
        assert_eq!(state.odometer_x, 0.0);
    }

    #[test]
    fn test_walk_frame_wraps() {
        let mut state = CharacterState {
            walk_frame: 7,
            odometer_x: 25.0,
            ..CharacterState::default()
        };
        assert!(state.advance_walk(20.0, 8));
        assert_eq!(state.walk_frame, 0);
    }

    #[test]
    fn test_climb_frame_wraps() {
        let mut state = CharacterState {
            climb_frame: 1,
            odometer_y: 21.0,
            ..CharacterState::default()
        };
        assert!(state.advance_climb(20.0, 2));
        assert_eq!(state.climb_frame, 0);
    }

    #[test]
    fn test_animation_names() {
        assert_eq!(AnimationState::Idle.animation_name(), "idle");
        assert_eq!(AnimationState::Climbing.animation_name(), "climb");
        assert!(AnimationState::Falling.is_airborne());
        assert!(AnimationState::Walking.is_cyclic());
        assert!(!AnimationState::Jumping.is_cyclic());
    }
}
