// Physics body seam between the character logic and whatever simulates it

use glam::Vec2;

/// A complete set of the body parameters that change when a character
/// grabs or leaves a ladder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyProfile {
    /// Gravity acting on this body (world units / s^2)
    pub gravity: Vec2,
    /// Fraction of velocity kept per second (1.0 = no damping)
    pub damping: f32,
    /// Horizontal speed cap (world units / s)
    pub max_horizontal_speed: f32,
    /// Vertical speed cap (world units / s)
    pub max_vertical_speed: f32,
}

/// Mutators the movement logic needs from a physics body.
///
/// Implementations must apply a [`BodyProfile`] as a whole before
/// returning, so a simulation step never sees half of a ladder change.
pub trait PhysicsBody {
    /// Replace gravity, damping and velocity caps in one go
    fn apply_profile(&mut self, profile: &BodyProfile);

    /// Add a continuous force for the next simulation step
    fn apply_force(&mut self, force: Vec2);

    /// Apply an instantaneous impulse
    fn apply_impulse(&mut self, impulse: Vec2);

    /// Set the friction coefficient of the body's collider
    fn set_friction(&mut self, friction: f32);
}
