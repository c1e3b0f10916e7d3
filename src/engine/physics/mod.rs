// Physics system using rapier2d

pub mod body;
mod collision;
mod world;

pub use body::{presets, BodyBuilder, ColliderBuilder2D};
pub use collision::{is_ground_normal, CollisionGroups, GROUND_NORMAL_THRESHOLD};
pub use world::{BodyMut, ColliderHandle, PhysicsWorld, RigidBodyHandle};

// Re-export commonly used rapier types for convenience
pub use rapier2d::prelude::{Real, RigidBodyType};
