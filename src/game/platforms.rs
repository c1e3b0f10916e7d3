// Boundary bouncing for moving platforms and patrolling enemies

use glam::Vec2;

/// Limits a moving object turns around at; unset sides never trigger
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Boundaries {
    pub left: Option<f32>,
    pub right: Option<f32>,
    pub top: Option<f32>,
    pub bottom: Option<f32>,
}

impl Boundaries {
    /// Horizontal travel between `left` and `right`
    pub fn horizontal(left: f32, right: f32) -> Self {
        Self {
            left: Some(left),
            right: Some(right),
            ..Self::default()
        }
    }

    /// Vertical travel between `bottom` and `top`
    pub fn vertical(bottom: f32, top: f32) -> Self {
        Self {
            top: Some(top),
            bottom: Some(bottom),
            ..Self::default()
        }
    }
}

/// Axis-aligned edges of a moving object
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extents {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Extents {
    pub fn from_center(center: Vec2, half_size: Vec2) -> Self {
        Self {
            left: center.x - half_size.x,
            right: center.x + half_size.x,
            top: center.y + half_size.y,
            bottom: center.y - half_size.y,
        }
    }
}

/// Flip each velocity component that carries the object further past a boundary
pub fn reverse_at_boundaries(boundaries: &Boundaries, extents: &Extents, velocity: Vec2) -> Vec2 {
    let mut velocity = velocity;

    let past_right = boundaries
        .right
        .is_some_and(|right| velocity.x > 0.0 && extents.right > right);
    let past_left = boundaries
        .left
        .is_some_and(|left| velocity.x < 0.0 && extents.left < left);
    if past_right || past_left {
        velocity.x = -velocity.x;
    }

    let past_top = boundaries
        .top
        .is_some_and(|top| velocity.y > 0.0 && extents.top > top);
    let past_bottom = boundaries
        .bottom
        .is_some_and(|bottom| velocity.y < 0.0 && extents.bottom < bottom);
    if past_top || past_bottom {
        velocity.y = -velocity.y;
    }

    velocity
}
