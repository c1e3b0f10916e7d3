// Shared, engine-agnostic building blocks

pub mod body;
pub mod math;

pub use body::{BodyProfile, PhysicsBody};
