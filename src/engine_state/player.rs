//! # Player Controller
//!
//! Turns movement intents into motion through the shared collision resolver.
//!
//! The player is a `0.6 x 1.8` box. Movement is relative to the look yaw, the
//! same yaw convention the mobs use (yaw 0 faces +Z). Unlike mobs, the player
//! keeps its exact height on landing.
//!
//! The player hangs still until the chunk under its feet has been generated,
//! so that a fresh spawn does not drop through terrain that does not exist yet.

use cgmath::{InnerSpace, MetricSpace, Point3, Vector2, Vector3};

use super::physics::{
    apply_void_safety, move_and_collide, Aabb, Body, CollisionReport, LandingMode, GRAVITY,
};
use super::voxels::{block::block_type::BlockType, world::BlockQuery};

/// Width of the player's box.
pub const PLAYER_WIDTH: f32 = 0.6;
/// Height of the player's box.
pub const PLAYER_HEIGHT: f32 = 1.8;
/// Height of the eyes above the feet.
pub const EYE_HEIGHT: f32 = 1.6;
/// Walking speed in blocks per second.
pub const WALK_SPEED: f32 = 4.5;
/// Upward speed at the start of a jump.
pub const JUMP_SPEED: f32 = 8.0;
/// Damage of one melee hit.
pub const ATTACK_DAMAGE: f32 = 4.0;

/// A request to put a block into the world.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlockPlacement {
    /// Global coordinates of the cell to fill
    pub target: Point3<i32>,
    /// Type of block to take from the inventory
    pub block_type: BlockType,
}

/// Everything the player wants to do this step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerIntent {
    /// Desired movement; `y` is forward and `x` strafes right. Longer than
    /// one is clamped.
    pub movement: Vector2<f32>,
    /// Look direction around the vertical axis, in radians
    pub yaw: f32,
    /// Jump if standing on the ground
    pub jump: bool,
    /// Swing at the nearest mob in reach
    pub attack: bool,
    /// Block to place from the selected slot
    pub place: Option<BlockPlacement>,
    /// Global coordinates of a block to break
    pub break_block: Option<Point3<i32>>,
}

impl Default for PlayerIntent {
    fn default() -> Self {
        PlayerIntent {
            movement: Vector2::new(0.0, 0.0),
            yaw: 0.0,
            jump: false,
            attack: false,
            place: None,
            break_block: None,
        }
    }
}

/// The player's body and reach.
#[derive(Clone, Debug)]
pub struct Player {
    /// Collision box and velocity
    pub body: Body,
    /// Facing angle in radians, 0 facing +Z
    pub yaw: f32,
    /// How far the player can interact, measured from the eyes
    pub reach: f32,
    /// Where the player returns to after falling out of the world
    pub respawn_point: Point3<f32>,
}

impl Player {
    /// Creates a player standing at `position`.
    ///
    /// # Arguments
    /// * `position` - Position of the feet
    /// * `reach` - Interaction distance
    /// * `respawn_point` - Where to return after falling out of the world
    pub fn new(position: Point3<f32>, reach: f32, respawn_point: Point3<f32>) -> Self {
        Player {
            body: Body::new(position, PLAYER_WIDTH, PLAYER_HEIGHT),
            yaw: 0.0,
            reach,
            respawn_point,
        }
    }

    /// Position of the player's feet.
    pub fn position(&self) -> Point3<f32> {
        self.body.position
    }

    /// Position of the camera, [`EYE_HEIGHT`] above the feet.
    pub fn eye_position(&self) -> Point3<f32> {
        self.body.position + Vector3::new(0.0, EYE_HEIGHT, 0.0)
    }

    /// Moves the player by one step.
    ///
    /// # Arguments
    /// * `dt` - Seconds since the last step
    /// * `intent` - Movement, look and jump requests
    /// * `world` - Block occupancy
    ///
    /// # Returns
    /// What blocked the player, or an empty report while its chunk is missing.
    pub fn update(
        &mut self,
        dt: f32,
        intent: &PlayerIntent,
        world: &impl BlockQuery,
    ) -> CollisionReport {
        self.yaw = intent.yaw;

        if !world.is_loaded(self.body.position) {
            self.body.velocity = Vector3::new(0.0, 0.0, 0.0);
            return CollisionReport::default();
        }

        let walk = self.walk_velocity(intent.movement);
        self.body.velocity.x = walk.x;
        self.body.velocity.z = walk.z;

        if intent.jump && self.body.on_ground {
            self.body.velocity.y = JUMP_SPEED;
        }
        self.body.velocity.y -= GRAVITY * dt;

        let report = move_and_collide(&mut self.body, dt, world, LandingMode::Exact);
        apply_void_safety(&mut self.body, self.respawn_point);
        report
    }

    /// Horizontal velocity for a movement intent at the current yaw.
    fn walk_velocity(&self, movement: Vector2<f32>) -> Vector3<f32> {
        let forward = Vector3::new(self.yaw.sin(), 0.0, self.yaw.cos());
        let right = Vector3::new(-self.yaw.cos(), 0.0, self.yaw.sin());
        let wish = forward * movement.y + right * movement.x;
        if wish.magnitude2() > 1.0 {
            wish.normalize() * WALK_SPEED
        } else {
            wish * WALK_SPEED
        }
    }

    /// Whether the centre of a block is within reach of the eyes.
    pub fn can_reach(&self, target: Point3<i32>) -> bool {
        let centre = Point3::new(
            target.x as f32 + 0.5,
            target.y as f32 + 0.5,
            target.z as f32 + 0.5,
        );
        self.eye_position().distance(centre) <= self.reach
    }

    /// Whether a block at `target` would overlap the player's box.
    pub fn occupies(&self, target: Point3<i32>) -> bool {
        self.body
            .aabb()
            .intersects(&Aabb::voxel(target.x, target.y, target.z))
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use super::*;

    /// Flat ground at y < 4, loaded only where `x >= 0`.
    struct Ground;

    impl BlockQuery for Ground {
        fn get_block(&self, _x: i32, y: i32, _z: i32) -> BlockType {
            if y < 4 {
                BlockType::STONE
            } else {
                BlockType::AIR
            }
        }

        fn is_loaded(&self, position: Point3<f32>) -> bool {
            position.x >= 0.0
        }
    }

    fn standing_player() -> Player {
        let mut player = Player::new(Point3::new(8.5, 4.0, 8.5), 5.0, Point3::new(8.5, 20.0, 8.5));
        player.body.on_ground = true;
        player
    }

    #[test]
    fn walks_forward_along_yaw() {
        let mut player = standing_player();
        let intent = PlayerIntent {
            movement: Vector2::new(0.0, 1.0),
            yaw: FRAC_PI_2,
            ..PlayerIntent::default()
        };

        player.update(0.1, &intent, &Ground);

        assert!((player.position().x - 8.95).abs() < 1e-4);
        assert!((player.position().z - 8.5).abs() < 1e-4);
        assert!(player.body.on_ground);
        assert_eq!(player.position().y, 4.0);
    }

    #[test]
    fn diagonal_movement_is_not_faster() {
        let player = standing_player();
        let velocity = player.walk_velocity(Vector2::new(1.0, 1.0));
        assert!((velocity.magnitude() - WALK_SPEED).abs() < 1e-4);
    }

    #[test]
    fn jumps_only_from_the_ground() {
        let mut player = standing_player();
        let jump = PlayerIntent {
            jump: true,
            ..PlayerIntent::default()
        };

        player.update(0.016, &jump, &Ground);
        assert!(player.position().y > 4.0);
        assert!(!player.body.on_ground);

        let rising = player.body.velocity.y;
        player.update(0.016, &jump, &Ground);
        assert!(player.body.velocity.y < rising);
    }

    #[test]
    fn waits_for_terrain_before_falling() {
        let mut player = Player::new(Point3::new(-4.0, 30.0, 0.0), 5.0, Point3::new(0.0, 30.0, 0.0));
        player.update(0.1, &PlayerIntent::default(), &Ground);
        assert_eq!(player.position(), Point3::new(-4.0, 30.0, 0.0));

        player.body.position.x = 4.0;
        player.update(0.1, &PlayerIntent::default(), &Ground);
        assert!(player.position().y < 30.0);
    }

    #[test]
    fn reach_is_measured_from_the_eyes() {
        let player = standing_player();
        // Eyes at (8.5, 5.6, 8.5).
        assert!(player.can_reach(Point3::new(8, 3, 8)));
        assert!(player.can_reach(Point3::new(12, 5, 8)));
        assert!(!player.can_reach(Point3::new(14, 5, 8)));
    }

    #[test]
    fn occupies_cells_overlapping_the_body() {
        let player = standing_player();
        assert!(player.occupies(Point3::new(8, 4, 8)));
        assert!(player.occupies(Point3::new(8, 5, 8)));
        assert!(!player.occupies(Point3::new(8, 6, 8)));
        assert!(!player.occupies(Point3::new(8, 3, 8)));
        assert!(!player.occupies(Point3::new(9, 4, 8)));
    }
}
