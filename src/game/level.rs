// Level: builds the physics world from a layout and runs the per-tick loop

use glam::Vec2;
use log::{debug, info};
use std::collections::{HashMap, HashSet};

use super::characters::{
    ConfigError, Enemy, MovementConfig, MovementIntent, Player, PlayerTuning, StepFeedback,
    StepOutcome,
};
use super::items::{CollectibleKind, CollectibleSource, Scoreboard};
use super::platforms::{reverse_at_boundaries, Boundaries, Extents};
use crate::core::PhysicsBody;
use crate::engine::physics::{
    presets, ColliderHandle, PhysicsWorld, RigidBodyHandle, GROUND_NORMAL_THRESHOLD,
};

/// Width and height of one map tile in pixels
pub const TILE_SIZE: f32 = 64.0;

/// Falling below this height ends the game
pub const OUT_OF_BOUNDS: f32 = -100.0;

/// Side length of a collectible pickup
pub const COLLECTIBLE_SIZE: f32 = 32.0;

/// Damage dealt by landing on an enemy
pub const STOMP_DAMAGE: i32 = 1;

/// Axis-aligned box given by its center and full size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub center: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            center: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    pub fn half_size(&self) -> Vec2 {
        self.size / 2.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovingPlatformSpec {
    pub rect: Rect,
    pub velocity: Vec2,
    pub boundaries: Boundaries,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemySpec {
    pub position: Vec2,
    pub patrol: Boundaries,
}

/// Everything placed in a level. Coordinates are pixels, y-up.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelLayout {
    pub player_spawn: Vec2,
    pub player_size: Vec2,
    pub enemy_size: Vec2,
    pub platforms: Vec<Rect>,
    pub dynamic_items: Vec<Rect>,
    pub ladders: Vec<Rect>,
    pub moving_platforms: Vec<MovingPlatformSpec>,
    pub collectibles: Vec<(Vec2, CollectibleKind)>,
    pub enemies: Vec<EnemySpec>,
}

impl LevelLayout {
    /// An empty level with only a spawn point
    pub fn empty(player_spawn: Vec2) -> Self {
        Self {
            player_spawn,
            player_size: Vec2::new(48.0, 64.0),
            enemy_size: Vec2::new(48.0, 64.0),
            platforms: Vec::new(),
            dynamic_items: Vec::new(),
            ladders: Vec::new(),
            moving_platforms: Vec::new(),
            collectibles: Vec::new(),
            enemies: Vec::new(),
        }
    }

    /// Small built-in level: a walled-in floor, a raised ledge reached by a
    /// ladder, a crate, a moving platform, one of each collectible and an enemy
    pub fn demo() -> Self {
        let mut layout = Self::empty(Vec2::new(128.0, 112.0));
        let floor_top = TILE_SIZE;
        let wall_height = 10.0 * TILE_SIZE;

        layout.platforms = vec![
            Rect::new(640.0, floor_top / 2.0, 1280.0, TILE_SIZE),
            Rect::new(896.0, 288.0, 384.0, 32.0),
            Rect::new(-TILE_SIZE / 2.0, wall_height / 2.0, TILE_SIZE, wall_height),
            Rect::new(1280.0 + TILE_SIZE / 2.0, wall_height / 2.0, TILE_SIZE, wall_height),
        ];
        layout.ladders = vec![Rect::new(672.0, 200.0, TILE_SIZE, 272.0)];
        layout.dynamic_items = vec![Rect::new(384.0, floor_top + 32.0, 32.0, 32.0)];
        layout.moving_platforms = vec![MovingPlatformSpec {
            rect: Rect::new(256.0, 256.0, 128.0, 32.0),
            velocity: Vec2::new(100.0, 0.0),
            boundaries: Boundaries::horizontal(128.0, 512.0),
        }];
        layout.collectibles = vec![
            (Vec2::new(480.0, floor_top + 32.0), CollectibleKind::Coin),
            (Vec2::new(800.0, 336.0), CollectibleKind::Gem),
            (Vec2::new(1000.0, 336.0), CollectibleKind::Star),
            (Vec2::new(1200.0, floor_top + 32.0), CollectibleKind::Flag),
        ];
        layout.enemies = vec![EnemySpec {
            position: Vec2::new(1000.0, floor_top + 36.0),
            patrol: Boundaries::horizontal(900.0, 1250.0),
        }];
        layout
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    GameOver,
}

/// What happened during one tick
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    /// Player controller result, `None` when the tick did not run
    pub player: Option<StepOutcome>,
    pub collected: Vec<CollectibleKind>,
    /// Points of each enemy defeated this tick
    pub defeated: Vec<u32>,
    pub status: GameStatus,
}

impl TickReport {
    fn skipped(status: GameStatus) -> Self {
        Self {
            player: None,
            collected: Vec::new(),
            defeated: Vec::new(),
            status,
        }
    }
}

/// A body whose displacement is measured from one tick to the next
#[derive(Debug, Clone, Copy)]
struct TrackedBody {
    body: RigidBodyHandle,
    collider: ColliderHandle,
    last_position: Vec2,
    last_angle: f32,
}

impl TrackedBody {
    fn new(world: &PhysicsWorld, body: RigidBodyHandle, collider: ColliderHandle) -> Self {
        Self {
            body,
            collider,
            last_position: world.translation(body).unwrap_or_default(),
            last_angle: world.rotation(body).unwrap_or_default(),
        }
    }

    fn feedback(&mut self, world: &PhysicsWorld, ladders: &HashSet<ColliderHandle>) -> StepFeedback {
        let position = world.translation(self.body).unwrap_or(self.last_position);
        let angle = world.rotation(self.body).unwrap_or(self.last_angle);
        let delta = position - self.last_position;
        let d_angle = angle - self.last_angle;
        self.last_position = position;
        self.last_angle = angle;

        StepFeedback {
            dx: delta.x,
            dy: delta.y,
            d_angle,
            on_ground: world.is_on_ground(self.collider),
            ladder_overlaps: world
                .intersecting(self.collider)
                .iter()
                .filter(|handle| ladders.contains(*handle))
                .count(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct MovingPlatform {
    body: RigidBodyHandle,
    half_size: Vec2,
    boundaries: Boundaries,
}

#[derive(Debug, Clone)]
struct EnemyBody {
    enemy: Enemy,
    tracked: TrackedBody,
    half_size: Vec2,
}

#[derive(Debug, Clone, Copy)]
struct Pickup {
    body: RigidBodyHandle,
    kind: CollectibleKind,
}

/// Collectible sensors in the world, seen from the player's collider
struct WorldCollectibles<'a> {
    world: &'a mut PhysicsWorld,
    player: ColliderHandle,
    pickups: &'a mut HashMap<ColliderHandle, Pickup>,
}

impl CollectibleSource for WorldCollectibles<'_> {
    type Id = ColliderHandle;

    fn overlapping(&self) -> Vec<(ColliderHandle, CollectibleKind)> {
        self.world
            .intersecting(self.player)
            .into_iter()
            .filter_map(|handle| self.pickups.get(&handle).map(|pickup| (handle, pickup.kind)))
            .collect()
    }

    fn remove(&mut self, id: ColliderHandle) -> bool {
        match self.pickups.remove(&id) {
            Some(pickup) => {
                self.world.remove_rigid_body(pickup.body);
                true
            }
            None => false,
        }
    }
}

/// A running level: physics world, player, enemies and items
pub struct Level {
    layout: LevelLayout,
    config: MovementConfig,
    tuning: PlayerTuning,
    world: PhysicsWorld,
    player: Player,
    player_body: TrackedBody,
    ladders: HashSet<ColliderHandle>,
    pickups: HashMap<ColliderHandle, Pickup>,
    moving_platforms: Vec<MovingPlatform>,
    enemies: Vec<EnemyBody>,
    status: GameStatus,
    ticks: u64,
}

impl Level {
    pub fn new(
        layout: LevelLayout,
        config: MovementConfig,
        tuning: PlayerTuning,
    ) -> Result<Self, ConfigError> {
        let mut world = PhysicsWorld::with_gravity(Vec2::new(0.0, -tuning.gravity));

        for rect in &layout.platforms {
            let body = world.add_rigid_body(presets::wall_body(rect.center.x, rect.center.y));
            world.add_collider(presets::wall_collider(rect.size.x, rect.size.y, &tuning), body);
        }

        for rect in &layout.dynamic_items {
            let body =
                world.add_rigid_body(presets::dynamic_item_body(rect.center.x, rect.center.y));
            world.add_collider(
                presets::dynamic_item_collider(rect.size.x, rect.size.y, &tuning),
                body,
            );
        }

        let mut ladders = HashSet::new();
        for rect in &layout.ladders {
            let body = world.add_rigid_body(presets::wall_body(rect.center.x, rect.center.y));
            ladders.insert(world.add_collider(presets::ladder_collider(rect.size.x, rect.size.y), body));
        }

        let mut moving_platforms = Vec::with_capacity(layout.moving_platforms.len());
        for spec in &layout.moving_platforms {
            let body = world.add_rigid_body(presets::moving_platform_body(
                spec.rect.center.x,
                spec.rect.center.y,
                spec.velocity.x,
                spec.velocity.y,
            ));
            world.add_collider(
                presets::moving_platform_collider(spec.rect.size.x, spec.rect.size.y, &tuning),
                body,
            );
            moving_platforms.push(MovingPlatform {
                body,
                half_size: spec.rect.half_size(),
                boundaries: spec.boundaries,
            });
        }

        let mut pickups = HashMap::new();
        for (position, kind) in &layout.collectibles {
            let body = world.add_rigid_body(presets::wall_body(position.x, position.y));
            let collider =
                world.add_collider(presets::collectible_collider(COLLECTIBLE_SIZE), body);
            pickups.insert(collider, Pickup { body, kind: *kind });
        }

        let mut enemies = Vec::with_capacity(layout.enemies.len());
        for spec in &layout.enemies {
            let enemy = Enemy::new(config, &tuning, spec.patrol)?;
            let body = world.add_rigid_body(presets::enemy_body(spec.position.x, spec.position.y));
            let collider = world.add_collider(
                presets::enemy_collider(layout.enemy_size.x, layout.enemy_size.y, &tuning),
                body,
            );
            world
                .body_mut(body, collider)
                .apply_profile(&tuning.normal_profile());
            enemies.push(EnemyBody {
                enemy,
                tracked: TrackedBody::new(&world, body, collider),
                half_size: layout.enemy_size / 2.0,
            });
        }

        let scoreboard = Scoreboard::from_items(layout.collectibles.iter().map(|(_, kind)| *kind));
        let player = Player::new(config, tuning, scoreboard)?;
        let spawn = layout.player_spawn;
        let body = world.add_rigid_body(presets::player_body(spawn.x, spawn.y));
        let collider = world.add_collider(
            presets::player_collider(layout.player_size.x, layout.player_size.y, &tuning),
            body,
        );
        world
            .body_mut(body, collider)
            .apply_profile(&tuning.normal_profile());
        let player_body = TrackedBody::new(&world, body, collider);

        info!(
            "Level built: {} platforms, {} ladders, {} collectibles, {} enemies",
            layout.platforms.len() + layout.moving_platforms.len(),
            layout.ladders.len(),
            layout.collectibles.len(),
            layout.enemies.len()
        );

        Ok(Self {
            layout,
            config,
            tuning,
            world,
            player,
            player_body,
            ladders,
            pickups,
            moving_platforms,
            enemies,
            status: GameStatus::Playing,
            ticks: 0,
        })
    }

    /// Rebuild the level from its layout; score and status start over
    pub fn reset(&mut self) -> Result<(), ConfigError> {
        *self = Self::new(self.layout.clone(), self.config, self.tuning)?;
        info!("Level reset");
        Ok(())
    }

    /// Advance the level by one fixed timestep
    pub fn tick(&mut self, intent: &MovementIntent) -> TickReport {
        if self.status == GameStatus::GameOver {
            return TickReport::skipped(self.status);
        }
        self.ticks += 1;

        // Forces from last tick's contact state
        let command = self.player.resolve_forces(intent);
        command.apply(
            &mut self
                .world
                .body_mut(self.player_body.body, self.player_body.collider),
        );

        for enemy in &mut self.enemies {
            let Some(position) = self.world.translation(enemy.tracked.body) else {
                continue;
            };
            let force = enemy
                .enemy
                .patrol_force(&Extents::from_center(position, enemy.half_size));
            self.world
                .body_mut(enemy.tracked.body, enemy.tracked.collider)
                .apply_force(force);
        }

        self.world.step();

        for platform in &self.moving_platforms {
            let (Some(position), Some(velocity)) = (
                self.world.translation(platform.body),
                self.world.linvel(platform.body),
            ) else {
                continue;
            };
            let extents = Extents::from_center(position, platform.half_size);
            let reversed = reverse_at_boundaries(&platform.boundaries, &extents, velocity);
            if reversed != velocity {
                debug!("Moving platform {:?} turned around", platform.body);
                self.world.set_linvel(platform.body, reversed);
            }
        }

        // Player
        let feedback = self.player_body.feedback(&self.world, &self.ladders);
        self.player.begin_step(
            &feedback,
            &mut self
                .world
                .body_mut(self.player_body.body, self.player_body.collider),
        );
        let collected = self.player.collect(&mut WorldCollectibles {
            world: &mut self.world,
            player: self.player_body.collider,
            pickups: &mut self.pickups,
        });
        let outcome = self.player.finish_step(&feedback);

        // Enemies
        let no_ladders = HashSet::new();
        for enemy in &mut self.enemies {
            let feedback = enemy.tracked.feedback(&self.world, &no_ladders);
            enemy.enemy.on_physics_step(
                &feedback,
                &mut self
                    .world
                    .body_mut(enemy.tracked.body, enemy.tracked.collider),
            );
        }

        let defeated = self.resolve_stomps();

        if let Some(position) = self.world.translation(self.player_body.body) {
            if position.y < OUT_OF_BOUNDS {
                self.status = GameStatus::GameOver;
                info!(
                    "Game over after {} ticks (score {})",
                    self.ticks,
                    self.player.score()
                );
            }
        }

        TickReport {
            player: Some(outcome),
            collected,
            defeated,
            status: self.status,
        }
    }

    /// Damage every enemy the player is standing on; defeated ones leave the world
    fn resolve_stomps(&mut self) -> Vec<u32> {
        let player = self.player_body;
        let mut defeated = Vec::new();
        let mut stomped = false;

        for enemy in &mut self.enemies {
            let on_top = self
                .world
                .contact_normal_from(player.collider, enemy.tracked.collider)
                .is_some_and(|normal| normal.y < -GROUND_NORMAL_THRESHOLD);
            if !on_top {
                continue;
            }
            stomped = true;
            if enemy.enemy.take_damage(STOMP_DAMAGE) {
                defeated.push(enemy.enemy.points());
            }
        }

        if stomped {
            // Bounce off so one landing is one hit
            self.world
                .body_mut(player.body, player.collider)
                .apply_impulse(Vec2::new(0.0, self.tuning.jump_impulse / 2.0));
        }

        let world = &mut self.world;
        self.enemies.retain(|enemy| {
            if enemy.enemy.is_alive() {
                return true;
            }
            world.remove_rigid_body(enemy.tracked.body);
            false
        });
        for points in &defeated {
            self.player.add_points(*points);
        }
        defeated
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_position(&self) -> Vec2 {
        self.world
            .translation(self.player_body.body)
            .unwrap_or(self.player_body.last_position)
    }

    pub fn player_handle(&self) -> RigidBodyHandle {
        self.player_body.body
    }

    pub fn world(&self) -> &PhysicsWorld {
        &self.world
    }

    pub fn layout(&self) -> &LevelLayout {
        &self.layout
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn enemy_count(&self) -> usize {
        self.enemies.len()
    }

    pub fn remaining_collectibles(&self) -> usize {
        self.pickups.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::characters::AnimationState;

    fn floor() -> Rect {
        Rect::new(0.0, 0.0, 2000.0, TILE_SIZE)
    }

    fn level(layout: LevelLayout) -> Level {
        Level::new(layout, MovementConfig::default(), PlayerTuning::default()).unwrap()
    }

    fn run(level: &mut Level, ticks: usize) -> Vec<TickReport> {
        (0..ticks)
            .map(|_| level.tick(&MovementIntent::default()))
            .collect()
    }

    #[test]
    fn test_demo_layout_builds() {
        let level = level(LevelLayout::demo());
        let board = level.player().scoreboard();

        assert_eq!(level.status(), GameStatus::Playing);
        assert_eq!(level.enemy_count(), 1);
        assert_eq!(level.remaining_collectibles(), 4);
        for kind in CollectibleKind::ALL {
            assert_eq!(board.remaining(kind), 1);
        }
    }

    #[test]
    fn test_demo_walls_keep_player_in_the_level() {
        let mut level = level(LevelLayout::demo());
        let right = MovementIntent {
            right: true,
            ..MovementIntent::default()
        };

        for _ in 0..600 {
            level.tick(&right);
        }

        assert_eq!(level.status(), GameStatus::Playing);
        assert!(level.player_position().x < 1280.0);
    }

    #[test]
    fn test_player_settles_on_floor() {
        let mut layout = LevelLayout::empty(Vec2::new(0.0, 100.0));
        layout.platforms.push(floor());
        let mut level = level(layout);

        let reports = run(&mut level, 120);
        let last = reports.last().unwrap().player.unwrap();

        assert!(level.player().controller().is_on_ground());
        assert_eq!(last.animation, Some(AnimationState::Idle));
        // Floor top is 32, player half height 32
        assert!((level.player_position().y - 64.0).abs() < 2.0);
    }

    #[test]
    fn test_falling_off_the_world_ends_the_game() {
        let mut level = level(LevelLayout::empty(Vec2::ZERO));

        let reports = run(&mut level, 120);
        assert_eq!(level.status(), GameStatus::GameOver);
        assert!(reports
            .iter()
            .any(|report| report.player.map(|p| p.animation) == Some(Some(AnimationState::Falling))));

        // Frozen until reset
        let ticks = level.ticks();
        let position = level.player_position();
        let report = level.tick(&MovementIntent::default());
        assert_eq!(report.player, None);
        assert_eq!(report.status, GameStatus::GameOver);
        assert_eq!(level.ticks(), ticks);
        assert_eq!(level.player_position(), position);

        level.reset().unwrap();
        assert_eq!(level.status(), GameStatus::Playing);
        assert_eq!(level.ticks(), 0);
    }

    #[test]
    fn test_coin_at_spawn_scores_once() {
        let spawn = Vec2::new(0.0, 64.0);
        let mut layout = LevelLayout::empty(spawn);
        layout.platforms.push(floor());
        layout.collectibles.push((spawn, CollectibleKind::Coin));
        let mut level = level(layout);

        let reports = run(&mut level, 10);
        let collected: Vec<_> = reports.iter().flat_map(|r| r.collected.clone()).collect();

        assert_eq!(collected, vec![CollectibleKind::Coin]);
        assert_eq!(level.player().score(), 10);
        assert_eq!(level.remaining_collectibles(), 0);
        assert!(level.player().scoreboard().all_collected());

        level.reset().unwrap();
        assert_eq!(level.player().score(), 0);
        assert_eq!(level.remaining_collectibles(), 1);
    }

    #[test]
    fn test_ladder_at_spawn_disables_gravity() {
        let spawn = Vec2::new(0.0, 200.0);
        let mut layout = LevelLayout::empty(spawn);
        layout.platforms.push(floor());
        layout.ladders.push(Rect::new(0.0, 200.0, TILE_SIZE, 256.0));
        let mut level = level(layout);

        let reports = run(&mut level, 2);

        assert!(level.player().controller().is_on_ladder());
        assert_eq!(
            reports[0].player.unwrap().ladder,
            Some(crate::game::characters::LadderEdge::Entered)
        );
        let body = level.world().get_rigid_body(level.player_handle()).unwrap();
        assert_eq!(body.gravity_scale(), 0.0);
    }

    #[test]
    fn test_landing_on_enemy_defeats_it() {
        let mut layout = LevelLayout::empty(Vec2::new(0.0, 172.0));
        layout.platforms.push(floor());
        layout.enemies.push(EnemySpec {
            position: Vec2::new(0.0, 64.0),
            patrol: Boundaries::horizontal(-500.0, 500.0),
        });
        let mut level = level(layout);

        let reports = run(&mut level, 60);
        let defeated: Vec<u32> = reports.iter().flat_map(|r| r.defeated.clone()).collect();

        assert_eq!(defeated, vec![50]);
        assert_eq!(level.enemy_count(), 0);
        assert_eq!(level.player().score(), 50);
    }

    #[test]
    fn test_moving_platform_turns_around() {
        let mut layout = LevelLayout::empty(Vec2::new(-500.0, 100.0));
        layout.platforms.push(floor());
        layout.moving_platforms.push(MovingPlatformSpec {
            rect: Rect::new(0.0, 300.0, 128.0, 32.0),
            velocity: Vec2::new(120.0, 0.0),
            boundaries: Boundaries::horizontal(-100.0, 100.0),
        });
        let mut level = level(layout);

        let mut saw_reverse = false;
        for _ in 0..120 {
            level.tick(&MovementIntent::default());
            let body = level.moving_platforms[0].body;
            if level.world().linvel(body).unwrap().x < 0.0 {
                saw_reverse = true;
            }
            let x = level.world().translation(body).unwrap().x;
            assert!(x.abs() < 100.0);
        }
        assert!(saw_reverse);
    }
}
