//! # Collision and Physics
//!
//! Axis-separated AABB-vs-voxel collision shared by the player and every mob.
//!
//! A moving body is an axis-aligned box with its pivot at the feet: full width
//! `width` centred on `(x, z)` and `height` rising from `y`. Each step the
//! velocity is integrated one axis at a time in the order X, Z, Y. After each
//! axis the box is tested against every voxel it could touch and, on any
//! overlap with a solid block, only that axis is moved back. Resolving axes
//! separately is what lets bodies slide along walls.
//!
//! The test is discrete, so a body moving more than a block per step can pass
//! through thin walls and floors. At the engine's longest step of 0.1 s that
//! means any speed above 10 blocks per second.

use cgmath::{Point3, Vector3};
use log::warn;

use crate::engine_state::voxels::world::BlockQuery;

mod aabb;

pub use aabb::Aabb;

/// Downward acceleration applied by controllers, in blocks per second squared.
pub const GRAVITY: f32 = 25.0;
/// Bodies below this height are considered lost and get teleported back.
pub const VOID_DEPTH: f32 = -50.0;

/// How a body's feet settle when it lands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LandingMode {
    /// Keep the pre-move height as is (player).
    Exact,
    /// Round the landed height to the nearest integer so the body sits flush
    /// on the voxel grid (mobs).
    SnapToGrid,
}

/// A box-shaped body driven by a velocity.
#[derive(Clone, Debug, PartialEq)]
pub struct Body {
    /// Position of the centre of the feet
    pub position: Point3<f32>,
    /// Velocity in blocks per second
    pub velocity: Vector3<f32>,
    /// Full width of the box along X and Z
    pub width: f32,
    /// Height of the box above the feet
    pub height: f32,
    /// Set when the last vertical move was stopped by the ground
    pub on_ground: bool,
}

impl Body {
    /// Creates a body at rest.
    ///
    /// # Arguments
    /// * `position` - Position of the feet
    /// * `width` - Full width of the box
    /// * `height` - Height of the box
    pub fn new(position: Point3<f32>, width: f32, height: f32) -> Self {
        Body {
            position,
            velocity: Vector3::new(0.0, 0.0, 0.0),
            width,
            height,
            on_ground: false,
        }
    }

    /// The box currently occupied by the body.
    pub fn aabb(&self) -> Aabb {
        let half = self.width / 2.0;
        Aabb::new(
            Point3::new(
                self.position.x - half,
                self.position.y,
                self.position.z - half,
            ),
            Point3::new(
                self.position.x + half,
                self.position.y + self.height,
                self.position.z + half,
            ),
        )
    }
}

/// What stopped a body during one call to [`move_and_collide`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CollisionReport {
    /// The X move was reverted
    pub blocked_x: bool,
    /// The Z move was reverted
    pub blocked_z: bool,
    /// A downward move was stopped by the ground
    pub landed: bool,
    /// An upward move was stopped by a ceiling
    pub hit_ceiling: bool,
}

impl CollisionReport {
    /// Whether either horizontal axis was blocked.
    pub fn blocked_horizontally(&self) -> bool {
        self.blocked_x || self.blocked_z
    }
}

/// Whether the body overlaps any solid voxel at its current position.
pub fn collides(body: &Body, world: &impl BlockQuery) -> bool {
    let aabb = body.aabb();
    let (min, max) = aabb.voxel_range();

    for y in min.y..max.y {
        for z in min.z..max.z {
            for x in min.x..max.x {
                if world.has_block(x, y, z) && aabb.intersects(&Aabb::voxel(x, y, z)) {
                    return true;
                }
            }
        }
    }
    false
}

/// Integrates `body.velocity * dt` axis by axis (X, Z, then Y), reverting each
/// axis whose move ends inside a solid voxel.
///
/// Vertical hits zero the vertical velocity. A downward hit also sets
/// `on_ground`; with [`LandingMode::SnapToGrid`] the height is then rounded to
/// the nearest integer.
///
/// # Returns
/// Which axes were blocked.
pub fn move_and_collide(
    body: &mut Body,
    dt: f32,
    world: &impl BlockQuery,
    landing: LandingMode,
) -> CollisionReport {
    let mut report = CollisionReport::default();

    let previous_x = body.position.x;
    body.position.x += body.velocity.x * dt;
    if collides(body, world) {
        body.position.x = previous_x;
        report.blocked_x = true;
    }

    let previous_z = body.position.z;
    body.position.z += body.velocity.z * dt;
    if collides(body, world) {
        body.position.z = previous_z;
        report.blocked_z = true;
    }

    let previous_y = body.position.y;
    body.position.y += body.velocity.y * dt;
    if collides(body, world) {
        body.position.y = previous_y;
        if body.velocity.y < 0.0 {
            report.landed = true;
            body.on_ground = true;
            if landing == LandingMode::SnapToGrid {
                body.position.y = body.position.y.round();
            }
        } else {
            report.hit_ceiling = true;
        }
        body.velocity.y = 0.0;
    } else {
        body.on_ground = false;
    }

    report
}

/// Teleports a body that fell out of the world back to `respawn`.
///
/// # Returns
/// `true` if the body was below [`VOID_DEPTH`] and got moved.
pub fn apply_void_safety(body: &mut Body, respawn: Point3<f32>) -> bool {
    if body.position.y >= VOID_DEPTH {
        return false;
    }

    warn!(
        "Body fell into the void at ({:.1}, {:.1}, {:.1}); respawning",
        body.position.x, body.position.y, body.position.z
    );
    body.position = respawn;
    body.velocity = Vector3::new(0.0, 0.0, 0.0);
    body.on_ground = false;
    true
}
