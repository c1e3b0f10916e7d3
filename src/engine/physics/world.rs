use glam::Vec2;
use log::warn;
use rapier2d::prelude::*;
use std::collections::HashMap;

use super::collision::is_ground_normal;
use crate::core::math::{clamp_magnitude, retained_to_linear_damping};
use crate::core::{BodyProfile, PhysicsBody};

/// Handle to identify rigid bodies
pub type RigidBodyHandle = rapier2d::prelude::RigidBodyHandle;

/// Handle to identify colliders
pub type ColliderHandle = rapier2d::prelude::ColliderHandle;

/// Per-axis speed limits enforced after every step
#[derive(Debug, Clone, Copy, PartialEq)]
struct VelocityCap {
    max_x: Real,
    max_y: Real,
}

/// Physics world that manages all physics simulation
pub struct PhysicsWorld {
    /// Gravity vector (pixels / s^2, y-up)
    gravity: Vector<Real>,

    /// Integration parameters for the physics simulation
    integration_parameters: IntegrationParameters,

    /// Physics pipeline handles collision detection and solving
    physics_pipeline: PhysicsPipeline,

    /// Island manager for sleeping bodies
    island_manager: IslandManager,

    /// Broad phase collision detection
    broad_phase: DefaultBroadPhase,

    /// Narrow phase collision detection; also answers ground and overlap queries
    narrow_phase: NarrowPhase,

    /// Impulse joint set
    impulse_joint_set: ImpulseJointSet,

    /// Multibody joint set
    multibody_joint_set: MultibodyJointSet,

    /// CCD solver for fast-moving objects
    ccd_solver: CCDSolver,

    /// Rigid body set
    rigid_body_set: RigidBodySet,

    /// Collider set
    collider_set: ColliderSet,

    /// Speed limits for bodies that have one
    velocity_caps: HashMap<RigidBodyHandle, VelocityCap>,
}

impl PhysicsWorld {
    /// Create a new physics world with custom gravity
    pub fn with_gravity(gravity: Vec2) -> Self {
        let mut integration_parameters = IntegrationParameters::default();
        // Fixed timestep of 1/60 seconds (60 FPS)
        integration_parameters.dt = 1.0 / 60.0;

        Self {
            gravity: to_vector(gravity),
            integration_parameters,
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            velocity_caps: HashMap::new(),
        }
    }

    /// Step the physics simulation forward by one timestep.
    ///
    /// Forces added before the step act for this step only; speed caps are
    /// enforced on the resulting velocities.
    pub fn step(&mut self) {
        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            None,
            &(),
            &(),
        );

        for (handle, body) in self.rigid_body_set.iter_mut() {
            if !body.is_dynamic() {
                continue;
            }
            body.reset_forces(false);

            if let Some(cap) = self.velocity_caps.get(&handle) {
                let velocity = *body.linvel();
                let capped = vector![
                    clamp_magnitude(velocity.x, cap.max_x),
                    clamp_magnitude(velocity.y, cap.max_y)
                ];
                if capped != velocity {
                    body.set_linvel(capped, false);
                }
            }
        }
    }

    /// Add a rigid body to the physics world
    pub fn add_rigid_body(&mut self, body: RigidBody) -> RigidBodyHandle {
        self.rigid_body_set.insert(body)
    }

    /// Add a collider attached to a rigid body
    pub fn add_collider(
        &mut self,
        collider: Collider,
        parent_handle: RigidBodyHandle,
    ) -> ColliderHandle {
        self.collider_set
            .insert_with_parent(collider, parent_handle, &mut self.rigid_body_set)
    }

    /// Remove a rigid body and all its attached colliders
    pub fn remove_rigid_body(&mut self, handle: RigidBodyHandle) {
        self.rigid_body_set.remove(
            handle,
            &mut self.island_manager,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            true, // remove attached colliders
        );
        self.velocity_caps.remove(&handle);
    }

    /// Check if a body is still in the world
    pub fn contains_body(&self, handle: RigidBodyHandle) -> bool {
        self.rigid_body_set.contains(handle)
    }

    /// Borrow a body and its collider through the [`PhysicsBody`] interface
    pub fn body_mut(&mut self, body: RigidBodyHandle, collider: ColliderHandle) -> BodyMut<'_> {
        BodyMut {
            world: self,
            body,
            collider,
        }
    }

    /// Get a reference to a rigid body
    pub fn get_rigid_body(&self, handle: RigidBodyHandle) -> Option<&RigidBody> {
        self.rigid_body_set.get(handle)
    }

    /// Get a reference to a collider
    pub fn get_collider(&self, handle: ColliderHandle) -> Option<&Collider> {
        self.collider_set.get(handle)
    }

    /// Position of a body's center
    pub fn translation(&self, handle: RigidBodyHandle) -> Option<Vec2> {
        self.rigid_body_set
            .get(handle)
            .map(|body| to_vec2(body.translation()))
    }

    /// Rotation of a body in radians
    pub fn rotation(&self, handle: RigidBodyHandle) -> Option<Real> {
        self.rigid_body_set
            .get(handle)
            .map(|body| body.rotation().angle())
    }

    pub fn linvel(&self, handle: RigidBodyHandle) -> Option<Vec2> {
        self.rigid_body_set
            .get(handle)
            .map(|body| to_vec2(body.linvel()))
    }

    pub fn set_linvel(&mut self, handle: RigidBodyHandle, velocity: Vec2) {
        if let Some(body) = self.rigid_body_set.get_mut(handle) {
            body.set_linvel(to_vector(velocity), true);
        }
    }

    /// Check if the collider is resting on something solid
    pub fn is_on_ground(&self, collider: ColliderHandle) -> bool {
        self.narrow_phase
            .contact_pairs_with(collider)
            .filter(|pair| pair.has_any_active_contact)
            .any(|pair| {
                let flip = pair.collider1 != collider;
                pair.manifolds.iter().any(|manifold| {
                    if manifold.data.solver_contacts.is_empty() {
                        return false;
                    }
                    let normal = if flip {
                        -manifold.data.normal
                    } else {
                        manifold.data.normal
                    };
                    is_ground_normal(&normal)
                })
            })
    }

    /// Colliders (sensors included) currently overlapping `collider`
    pub fn intersecting(&self, collider: ColliderHandle) -> Vec<ColliderHandle> {
        self.narrow_phase
            .intersection_pairs_with(collider)
            .filter(|(_, _, intersecting)| *intersecting)
            .map(|(a, b, _)| if a == collider { b } else { a })
            .collect()
    }

    /// Contact normal between two touching colliders, pointing away from `from`
    pub fn contact_normal_from(&self, from: ColliderHandle, other: ColliderHandle) -> Option<Vec2> {
        let pair = self.narrow_phase.contact_pair(from, other)?;
        if !pair.has_any_active_contact {
            return None;
        }
        let manifold = pair
            .manifolds
            .iter()
            .find(|manifold| !manifold.data.solver_contacts.is_empty())?;
        let normal = if pair.collider1 == from {
            manifold.data.normal
        } else {
            -manifold.data.normal
        };
        Some(to_vec2(&normal))
    }

    /// Get current gravity
    pub fn gravity(&self) -> Vec2 {
        to_vec2(&self.gravity)
    }

    /// Get the current timestep
    pub fn timestep(&self) -> Real {
        self.integration_parameters.dt
    }

    fn set_velocity_cap(&mut self, handle: RigidBodyHandle, max_x: Real, max_y: Real) {
        self.velocity_caps
            .insert(handle, VelocityCap { max_x, max_y });
    }
}

/// A body inside a [`PhysicsWorld`], seen through the [`PhysicsBody`] seam
pub struct BodyMut<'a> {
    world: &'a mut PhysicsWorld,
    body: RigidBodyHandle,
    collider: ColliderHandle,
}

impl PhysicsBody for BodyMut<'_> {
    fn apply_profile(&mut self, profile: &BodyProfile) {
        if profile.gravity.x != 0.0 {
            warn!(
                "Ignoring horizontal gravity {} on body {:?}",
                profile.gravity.x, self.body
            );
        }
        let world_gravity = self.world.gravity.y;
        let scale = if world_gravity != 0.0 {
            profile.gravity.y / world_gravity
        } else {
            0.0
        };

        if let Some(body) = self.world.rigid_body_set.get_mut(self.body) {
            body.set_gravity_scale(scale, true);
            body.set_linear_damping(retained_to_linear_damping(profile.damping));
        }
        self.world.set_velocity_cap(
            self.body,
            profile.max_horizontal_speed,
            profile.max_vertical_speed,
        );
    }

    fn apply_force(&mut self, force: Vec2) {
        if let Some(body) = self.world.rigid_body_set.get_mut(self.body) {
            body.add_force(to_vector(force), true);
        }
    }

    fn apply_impulse(&mut self, impulse: Vec2) {
        if let Some(body) = self.world.rigid_body_set.get_mut(self.body) {
            body.apply_impulse(to_vector(impulse), true);
        }
    }

    fn set_friction(&mut self, friction: f32) {
        if let Some(collider) = self.world.collider_set.get_mut(self.collider) {
            collider.set_friction(friction);
        }
    }
}

fn to_vector(v: Vec2) -> Vector<Real> {
    vector![v.x, v.y]
}

fn to_vec2(v: &Vector<Real>) -> Vec2 {
    Vec2::new(v.x, v.y)
}
