// Ladder Runner: movement, animation and collectible logic for a 2D side-scroller
//
// - `core`: engine-agnostic seams (math helpers, the physics body trait)
// - `engine`: host collaborators (rapier2d world, input bindings, fixed-step loop)
// - `game`: characters, items, platforms and the level tick

pub mod core;
pub mod engine;
pub mod game;
