use super::collision::CollisionGroups;
use crate::game::characters::PlayerTuning;
use rapier2d::prelude::*;

/// Builder for creating rigid bodies with common configurations
pub struct BodyBuilder {
    body_type: RigidBodyType,
    position: Isometry<Real>,
    linvel: Vector<Real>,
    gravity_scale: Real,
    can_sleep: bool,
    locked_axes: LockedAxes,
}

impl BodyBuilder {
    fn with_type(body_type: RigidBodyType, gravity_scale: Real, can_sleep: bool) -> Self {
        Self {
            body_type,
            position: Isometry::identity(),
            linvel: Vector::zeros(),
            gravity_scale,
            can_sleep,
            locked_axes: LockedAxes::empty(),
        }
    }

    /// Create a new dynamic body (affected by forces and collisions)
    pub fn new_dynamic() -> Self {
        Self::with_type(RigidBodyType::Dynamic, 1.0, true)
    }

    /// Create a new kinematic velocity-based body (moves at the velocity it is given)
    pub fn new_kinematic_velocity_based() -> Self {
        Self::with_type(RigidBodyType::KinematicVelocityBased, 0.0, false)
    }

    /// Create a new fixed (static) body (completely immovable)
    pub fn new_fixed() -> Self {
        Self::with_type(RigidBodyType::Fixed, 0.0, false)
    }

    /// Set the initial position of the body
    pub fn position(mut self, x: Real, y: Real) -> Self {
        self.position = Isometry::translation(x, y);
        self
    }

    /// Set the initial linear velocity
    pub fn linvel(mut self, x: Real, y: Real) -> Self {
        self.linvel = vector![x, y];
        self
    }

    /// Set the gravity scale (1.0 = normal gravity, 0.0 = no gravity)
    pub fn gravity_scale(mut self, scale: Real) -> Self {
        self.gravity_scale = scale;
        self
    }

    /// Set whether the body can sleep when inactive
    pub fn can_sleep(mut self, can_sleep: bool) -> Self {
        self.can_sleep = can_sleep;
        self
    }

    /// Lock rotation (characters stay upright)
    pub fn lock_rotation(mut self) -> Self {
        self.locked_axes = LockedAxes::ROTATION_LOCKED;
        self
    }

    /// Build the rigid body
    pub fn build(self) -> RigidBody {
        RigidBodyBuilder::new(self.body_type)
            .position(self.position)
            .linvel(self.linvel)
            .gravity_scale(self.gravity_scale)
            .can_sleep(self.can_sleep)
            .locked_axes(self.locked_axes)
            .build()
    }
}

/// Builder for creating box colliders with common configurations
pub struct ColliderBuilder2D {
    shape: SharedShape,
    collision_groups: CollisionGroups,
    is_sensor: bool,
    friction: Real,
    restitution: Real,
    density: Option<Real>,
    mass: Option<Real>,
}

impl ColliderBuilder2D {
    /// Create a box-shaped collider
    pub fn box_shape(half_width: Real, half_height: Real) -> Self {
        Self {
            shape: SharedShape::cuboid(half_width, half_height),
            collision_groups: CollisionGroups::Wall,
            is_sensor: false,
            friction: 0.5,
            restitution: 0.0,
            density: Some(1.0),
            mass: None,
        }
    }

    /// Set the collision groups for filtering
    pub fn collision_groups(mut self, groups: CollisionGroups) -> Self {
        self.collision_groups = groups;
        self
    }

    /// Make this a sensor (detects overlap but doesn't cause physical response)
    pub fn sensor(mut self, is_sensor: bool) -> Self {
        self.is_sensor = is_sensor;
        self
    }

    /// Set friction coefficient (0.0 = no friction, 1.0 = high friction)
    pub fn friction(mut self, friction: Real) -> Self {
        self.friction = friction;
        self
    }

    /// Set density (mass will be calculated from shape volume)
    pub fn density(mut self, density: Real) -> Self {
        self.density = Some(density);
        self.mass = None;
        self
    }

    /// Set mass directly (overrides density)
    pub fn mass(mut self, mass: Real) -> Self {
        self.mass = Some(mass);
        self.density = None;
        self
    }

    /// Build the collider
    pub fn build(self) -> Collider {
        let mut builder = rapier2d::prelude::ColliderBuilder::new(self.shape)
            .collision_groups(self.collision_groups.to_interaction_groups())
            .sensor(self.is_sensor)
            .friction(self.friction)
            .restitution(self.restitution);

        // Set mass or density
        if let Some(mass) = self.mass {
            builder = builder.mass(mass);
        } else if let Some(density) = self.density {
            builder = builder.density(density);
        }

        builder.build()
    }
}

/// Common rigid body configurations for level objects.
/// Sizes are full widths/heights in pixels.
pub mod presets {
    use super::*;

    /// Player body: dynamic, upright, never sleeps
    pub fn player_body(x: Real, y: Real) -> RigidBody {
        BodyBuilder::new_dynamic()
            .position(x, y)
            .lock_rotation()
            .can_sleep(false)
            .build()
    }

    /// Player collider with the tuned mass and friction
    pub fn player_collider(width: Real, height: Real, tuning: &PlayerTuning) -> Collider {
        ColliderBuilder2D::box_shape(width / 2.0, height / 2.0)
            .collision_groups(CollisionGroups::Player)
            .friction(tuning.friction)
            .mass(tuning.mass)
            .build()
    }

    /// Wall or platform body (fixed/static)
    pub fn wall_body(x: Real, y: Real) -> RigidBody {
        BodyBuilder::new_fixed().position(x, y).build()
    }

    pub fn wall_collider(width: Real, height: Real, tuning: &PlayerTuning) -> Collider {
        ColliderBuilder2D::box_shape(width / 2.0, height / 2.0)
            .collision_groups(CollisionGroups::Wall)
            .friction(tuning.friction_wall)
            .build()
    }

    /// Pushable item body (dynamic, may rotate)
    pub fn dynamic_item_body(x: Real, y: Real) -> RigidBody {
        BodyBuilder::new_dynamic().position(x, y).build()
    }

    pub fn dynamic_item_collider(width: Real, height: Real, tuning: &PlayerTuning) -> Collider {
        ColliderBuilder2D::box_shape(width / 2.0, height / 2.0)
            .collision_groups(CollisionGroups::DynamicItem)
            .friction(tuning.friction_dynamic_item)
            .density(1.0 / 1024.0) // a 32x32 crate weighs about one unit
            .build()
    }

    /// Ladder volume (sensor on a fixed body)
    pub fn ladder_collider(width: Real, height: Real) -> Collider {
        ColliderBuilder2D::box_shape(width / 2.0, height / 2.0)
            .collision_groups(CollisionGroups::Ladder)
            .sensor(true)
            .build()
    }

    /// Collectible pickup (sensor on a fixed body)
    pub fn collectible_collider(size: Real) -> Collider {
        ColliderBuilder2D::box_shape(size / 2.0, size / 2.0)
            .collision_groups(CollisionGroups::Collectible)
            .sensor(true)
            .build()
    }

    /// Enemy body: dynamic, upright
    pub fn enemy_body(x: Real, y: Real) -> RigidBody {
        BodyBuilder::new_dynamic()
            .position(x, y)
            .lock_rotation()
            .can_sleep(false)
            .build()
    }

    pub fn enemy_collider(width: Real, height: Real, tuning: &PlayerTuning) -> Collider {
        ColliderBuilder2D::box_shape(width / 2.0, height / 2.0)
            .collision_groups(CollisionGroups::Enemy)
            .friction(tuning.friction)
            .mass(tuning.mass)
            .build()
    }

    /// Moving platform: kinematic, driven by its velocity
    pub fn moving_platform_body(x: Real, y: Real, vel_x: Real, vel_y: Real) -> RigidBody {
        BodyBuilder::new_kinematic_velocity_based()
            .position(x, y)
            .linvel(vel_x, vel_y)
            .build()
    }

    pub fn moving_platform_collider(width: Real, height: Real, tuning: &PlayerTuning) -> Collider {
        ColliderBuilder2D::box_shape(width / 2.0, height / 2.0)
            .collision_groups(CollisionGroups::MovingPlatform)
            .friction(tuning.friction_wall)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_builder_dynamic() {
        let body = BodyBuilder::new_dynamic()
            .position(10.0, 20.0)
            .linvel(5.0, 0.0)
            .build();

        assert_eq!(body.body_type(), RigidBodyType::Dynamic);
        assert_eq!(body.translation().x, 10.0);
        assert_eq!(body.translation().y, 20.0);
    }

    #[test]
    fn test_player_preset() {
        let tuning = PlayerTuning::default();
        let body = presets::player_body(0.0, 0.0);
        let collider = presets::player_collider(40.0, 60.0, &tuning);

        assert_eq!(body.body_type(), RigidBodyType::Dynamic);
        assert!(body.is_rotation_locked());
        assert!(!collider.is_sensor());
        assert_eq!(collider.friction(), tuning.friction);
    }

    #[test]
    fn test_sensor_presets() {
        assert!(presets::ladder_collider(64.0, 256.0).is_sensor());
        assert!(presets::collectible_collider(32.0).is_sensor());
    }

    #[test]
    fn test_moving_platform_is_kinematic() {
        let body = presets::moving_platform_body(0.0, 0.0, 60.0, 0.0);
        assert_eq!(body.body_type(), RigidBodyType::KinematicVelocityBased);
        assert_eq!(body.linvel().x, 60.0);
    }
}
