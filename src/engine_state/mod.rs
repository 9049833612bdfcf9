//! # Engine State Module
//!
//! The core engine module that owns everything a play session needs and steps
//! it forward one frame at a time.
//!
//! ## Key Components
//!
//! * `EngineState` - The context object owning the world, player, mobs and inventory
//! * `voxels` - Block storage, terrain generation and chunk streaming
//! * `rendering` - Chunk meshes and the scene commands that carry them out
//! * `physics` - Axis-separated collision shared by the player and mobs
//! * `mobs` - Creature state machines
//! * `player` - The player controller and its intents
//! * `inventory` - The hotbar
//! * `persistence` - Save bundles and where they are kept
//! * `config` - Session settings
//!
//! ## Step Order
//!
//! Every call to [`EngineState::step`] runs, in order:
//!
//! 1. World streaming around the player's chunk
//! 2. Every mob's AI and physics
//! 3. Player movement and collision
//! 4. Block breaking, block placing and attacks requested by the intent
//!
//! The caller then drains the queued scene commands into its renderer with
//! [`EngineState::flush_scene_commands`].

use cgmath::{MetricSpace, Point3, Vector3};
use log::{debug, info};

use crate::error::EngineError;

use config::GameConfig;
use inventory::Inventory;
use mobs::{Mob, MobKind};
use persistence::{SaveBundle, WorldStore};
use physics::CollisionReport;
use player::{Player, PlayerIntent, ATTACK_DAMAGE};
use rendering::RenderScene;
use voxels::{
    block::block_type::BlockType,
    chunk::{chunk_creation::TerrainGenerator, CHUNK_DIMENSION},
    world::{World, STREAMING_RADIUS},
};

pub mod config;
pub mod inventory;
pub mod mobs;
pub mod persistence;
pub mod physics;
pub mod player;
pub mod rendering;
pub mod voxels;

/// Longest step simulated at once, in seconds. Longer frames are shortened.
///
/// This bounds how far a body moves per step but does not rule out tunnelling:
/// a body faster than 10 blocks per second can still skip a one-block wall or
/// floor in a single clamped step.
pub const MAX_STEP_SECONDS: f32 = 0.1;

/// What the player's actions achieved during one step.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StepOutcome {
    /// How the player's movement was blocked
    pub collision: CollisionReport,
    /// Type of the block broken this step
    pub broken: Option<BlockType>,
    /// Type of the block placed this step
    pub placed: Option<BlockType>,
    /// Whether an attack hit a mob
    pub mob_hit: bool,
}

/// The main state container for a play session.
///
/// # Examples
///
/// ```
/// use voxel_sandbox::engine_state::{
///     config::GameConfig, player::PlayerIntent, rendering::HeadlessScene, EngineState,
/// };
/// use web_time::Duration;
///
/// let mut engine = EngineState::new(GameConfig::default());
/// let mut scene = HeadlessScene::default();
///
/// // Main game loop
/// for _ in 0..3 {
///     engine.step(
///         Duration::from_millis(16),
///         &PlayerIntent::default(),
///         &mut |damage| println!("ouch: {damage}"),
///     );
///     engine.flush_scene_commands(&mut scene);
/// }
/// assert_eq!(scene.len(), 49);
/// ```
pub struct EngineState {
    /// The voxel world containing all chunk data
    world: World,
    player: Player,
    mobs: Vec<Mob>,
    inventory: Inventory,
    config: GameConfig,
    /// Seeds each new mob's random source
    rng: fastrand::Rng,
}

impl EngineState {
    /// Creates a session with Perlin terrain seeded from the configuration.
    pub fn new(config: GameConfig) -> Self {
        let generator = TerrainGenerator::new(config.seed);
        Self::with_generator(config, generator)
    }

    /// Creates a session with a custom terrain generator.
    ///
    /// # Arguments
    /// * `config` - Session settings
    /// * `generator` - Terrain source for streamed chunks
    pub fn with_generator(config: GameConfig, generator: TerrainGenerator) -> Self {
        let player = Player::new(
            Point3::from(config.spawn_point),
            config.player_reach,
            Point3::from(config.respawn_point),
        );
        info!(
            "Engine created with seed {}, player at {:?}",
            config.seed, config.spawn_point
        );

        EngineState {
            world: World::new(generator),
            player,
            mobs: Vec::new(),
            inventory: Inventory::default(),
            config,
            rng: fastrand::Rng::new(),
        }
    }

    /// Advances the session by one frame.
    ///
    /// # Arguments
    /// * `wait_duration` - Time since the last step; clamped to [`MAX_STEP_SECONDS`]
    /// * `intent` - What the player wants to do
    /// * `on_player_damaged` - Called with the damage of every mob attack that lands
    ///
    /// # Returns
    /// What the player's actions achieved.
    pub fn step(
        &mut self,
        wait_duration: web_time::Duration,
        intent: &PlayerIntent,
        on_player_damaged: &mut dyn FnMut(f32),
    ) -> StepOutcome {
        let dt = wait_duration.as_secs_f32().min(MAX_STEP_SECONDS);

        self.world.update(self.player.position());

        let target = self.player.position();
        for mob in &mut self.mobs {
            mob.update(dt, target, &self.world, on_player_damaged);
        }

        let mut outcome = StepOutcome {
            collision: self.player.update(dt, intent, &self.world),
            ..StepOutcome::default()
        };

        if let Some(target) = intent.break_block {
            outcome.broken = self.break_block(target);
        }
        if let Some(placement) = intent.place {
            if self.place_block(placement.target, placement.block_type) {
                outcome.placed = Some(placement.block_type);
            }
        }
        if intent.attack {
            outcome.mob_hit = self.attack();
        }

        outcome
    }

    /// Breaks a block in reach and puts it in the inventory.
    ///
    /// Air, bedrock and blocks out of reach are left alone. A block that does
    /// not fit in a full inventory is still broken.
    ///
    /// # Returns
    /// The type of the broken block.
    pub fn break_block(&mut self, target: Point3<i32>) -> Option<BlockType> {
        if !self.player.can_reach(target) {
            return None;
        }
        let block_type = self.world.get_block(target.x, target.y, target.z);
        if !block_type.is_breakable() {
            return None;
        }
        if !self.world.set_block(target.x, target.y, target.z, BlockType::AIR) {
            return None;
        }

        if self.inventory.add(block_type, 1) > 0 {
            debug!("Inventory full, dropped broken {:?}", block_type);
        }
        Some(block_type)
    }

    /// Places a block from the inventory.
    ///
    /// The target must be in reach, hold air and not overlap the player.
    ///
    /// # Returns
    /// `true` if the block was placed and taken from the inventory.
    pub fn place_block(&mut self, target: Point3<i32>, block_type: BlockType) -> bool {
        if block_type == BlockType::AIR
            || self.inventory.count_of(block_type) == 0
            || !self.player.can_reach(target)
            || self.player.occupies(target)
            || self.world.get_block(target.x, target.y, target.z) != BlockType::AIR
        {
            return false;
        }
        if !self.world.set_block(target.x, target.y, target.z, block_type) {
            return false;
        }
        self.inventory.remove(block_type, 1)
    }

    /// Hits the nearest living mob whose centre is within reach of the player's eyes.
    ///
    /// # Returns
    /// `true` if a mob was hit.
    pub fn attack(&mut self) -> bool {
        let eye = self.player.eye_position();
        let reach = self.player.reach;
        let nearest = self
            .mobs
            .iter_mut()
            .filter(|mob| !mob.is_dead())
            .map(|mob| {
                let centre = mob.position() + Vector3::new(0.0, mob.body.height / 2.0, 0.0);
                (eye.distance(centre), mob)
            })
            .filter(|(distance, _)| *distance <= reach)
            .min_by(|(a, _), (b, _)| a.total_cmp(b));

        let Some((_, mob)) = nearest else {
            return false;
        };
        mob.take_damage(ATTACK_DAMAGE, self.player.position());
        true
    }

    /// Adds a mob to the session.
    ///
    /// # Arguments
    /// * `kind` - Kind of mob
    /// * `position` - Position of its feet
    pub fn spawn_mob(&mut self, kind: MobKind, position: Point3<f32>) {
        debug!("Spawning {:?} mob at {:?}", kind, position);
        self.mobs.push(Mob::new(kind, position, self.rng.fork()));
    }

    /// Spawns mobs on the surface of random loaded columns around the player,
    /// alternating between kinds.
    ///
    /// # Returns
    /// How many mobs were spawned. Columns that are not loaded are skipped.
    pub fn spawn_mobs_around_player(&mut self, count: usize) -> usize {
        self.world.update(self.player.position());

        let span = STREAMING_RADIUS * CHUNK_DIMENSION;
        let centre = self.player.position();
        let mut spawned = 0;
        for index in 0..count {
            let x = centre.x.floor() as i32 + self.rng.i32(-span..span);
            let z = centre.z.floor() as i32 + self.rng.i32(-span..span);
            let Some(top) = self.world.surface_height(x, z) else {
                continue;
            };
            let kind = if index % 2 == 0 {
                MobKind::ZombieLike
            } else {
                MobKind::Passive
            };
            self.spawn_mob(
                kind,
                Point3::new(x as f32 + 0.5, (top + 1) as f32, z as f32 + 0.5),
            );
            spawned += 1;
        }
        spawned
    }

    /// Removes dead mobs from the session and hands them to the caller.
    pub fn drain_dead_mobs(&mut self) -> Vec<Mob> {
        let (dead, alive): (Vec<Mob>, Vec<Mob>) =
            std::mem::take(&mut self.mobs).into_iter().partition(Mob::is_dead);
        self.mobs = alive;
        dead
    }

    /// Applies all queued chunk mesh changes to the renderer.
    pub fn flush_scene_commands(&mut self, scene: &mut dyn RenderScene) {
        self.world.flush_scene_commands(scene);
    }

    /// Captures the savable part of the session.
    pub fn snapshot(&self) -> SaveBundle {
        let position = self.player.position();
        SaveBundle {
            player_position: [position.x, position.y, position.z],
            inventory: self.inventory.clone(),
        }
    }

    /// Puts the player and inventory back to a saved state.
    ///
    /// # Returns
    /// [`EngineError::InvalidSave`], leaving the session untouched, if the
    /// bundle fails [`SaveBundle::validate`].
    pub fn restore(&mut self, bundle: SaveBundle) -> Result<(), EngineError> {
        bundle.validate()?;
        self.player.body.position = Point3::from(bundle.player_position);
        self.player.body.velocity = Vector3::new(0.0, 0.0, 0.0);
        self.player.body.on_ground = false;
        self.inventory = bundle.inventory;
        Ok(())
    }

    /// Writes the current session to `store`.
    pub fn save(&self, store: &mut dyn WorldStore) -> Result<(), EngineError> {
        store.save_world(&self.snapshot())
    }

    /// Restores the session from `store`.
    ///
    /// # Returns
    /// `false` if the store was empty.
    pub fn load(&mut self, store: &dyn WorldStore) -> Result<bool, EngineError> {
        let Some(bundle) = store.load_world()? else {
            return Ok(false);
        };
        info!("Restoring player at {:?}", bundle.player_position);
        self.restore(bundle)?;
        Ok(true)
    }

    /// The loaded chunks.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// The player body and heading.
    pub fn player(&self) -> &Player {
        &self.player
    }

    /// Live mobs, including those killed this step.
    pub fn mobs(&self) -> &[Mob] {
        &self.mobs
    }

    /// Mutable access to the live mobs.
    pub fn mobs_mut(&mut self) -> &mut [Mob] {
        &mut self.mobs
    }

    /// The player's hotbar.
    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    /// Mutable access to the player's hotbar.
    pub fn inventory_mut(&mut self) -> &mut Inventory {
        &mut self.inventory
    }

    /// Settings the session was created with.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}
