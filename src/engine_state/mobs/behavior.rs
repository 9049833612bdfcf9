//! Per-kind state transitions and collision responses.
//!
//! Each function here is chosen by [`MobKind`](super::MobKind) and works on a
//! single mob. Transition functions set the mob's state and horizontal
//! velocity and return the damage of an attack that landed this tick, if any.

use std::f32::consts::TAU;

use cgmath::{InnerSpace, Vector3};
use log::trace;

use crate::engine_state::physics::CollisionReport;

use super::{Mob, MobState};

/// Distance under which an idle or wandering mob starts chasing.
pub const CHASE_RADIUS: f32 = 15.0;
/// Distance over which a chasing mob gives up. Larger than [`CHASE_RADIUS`] so
/// mobs near the edge do not flicker between states.
pub const GIVE_UP_RADIUS: f32 = 20.0;
/// A chasing mob stops closing in at this distance.
pub const STOP_DISTANCE: f32 = 2.0;
/// A chasing mob backs off when closer than this.
pub const SEPARATION_DISTANCE: f32 = 1.5;
/// Attacks land within this distance.
pub const ATTACK_RANGE: f32 = 2.2;
/// Seconds between two attacks.
pub const ATTACK_COOLDOWN: f32 = 1.5;
/// Chance per tick that an idle mob starts wandering.
pub const WANDER_CHANCE: f32 = 0.01;
/// Shortest wander, in seconds.
pub const WANDER_MIN_SECONDS: f32 = 2.0;
/// Longest wander, in seconds.
pub const WANDER_MAX_SECONDS: f32 = 3.0;
/// Upward speed of a mob hopping over an obstacle.
pub const JUMP_SPEED: f32 = 8.0;

/// What a mob knows about its target this tick.
#[derive(Clone, Copy, Debug)]
pub struct Senses {
    /// Straight-line distance to the target
    pub distance: f32,
    /// Horizontal offset from the mob to the target
    pub to_target: Vector3<f32>,
    /// Seconds since the last tick
    pub dt: f32,
}

/// Picks the next state and velocity for a mob.
pub type Transition = fn(&mut Mob, &Senses) -> Option<f32>;

/// Reacts to a step whose horizontal movement was blocked.
pub type CollisionHook = fn(&mut Mob, &CollisionReport);

/// Unit horizontal vector for a yaw angle, with yaw 0 facing +Z.
pub fn heading_vector(yaw: f32) -> Vector3<f32> {
    Vector3::new(yaw.sin(), 0.0, yaw.cos())
}

/// Yaw facing along a horizontal offset.
pub fn yaw_toward(offset: Vector3<f32>) -> f32 {
    offset.x.atan2(offset.z)
}

/// Wanders about and ignores the target.
pub fn passive(mob: &mut Mob, senses: &Senses) -> Option<f32> {
    roam(mob, senses.dt);
    None
}

/// Wanders until the target comes near, then chases and attacks it.
pub fn zombie_like(mob: &mut Mob, senses: &Senses) -> Option<f32> {
    match mob.state {
        MobState::Idle | MobState::Wander if senses.distance < CHASE_RADIUS => {
            enter(mob, MobState::Chase);
        }
        MobState::Chase | MobState::Attack if senses.distance > GIVE_UP_RADIUS => {
            enter(mob, MobState::Idle);
            stop(mob);
            return None;
        }
        _ => {}
    }

    match mob.state {
        MobState::Idle | MobState::Wander => {
            roam(mob, senses.dt);
            None
        }
        MobState::Chase | MobState::Attack => pursue(mob, senses),
    }
}

/// Zombies hop over whatever blocked them.
pub fn hop_obstacle(mob: &mut Mob, report: &CollisionReport) {
    if report.blocked_horizontally() && mob.body.on_ground {
        mob.body.velocity.y = JUMP_SPEED;
    }
}

/// Passive mobs turn away from whatever blocked them.
pub fn turn_around(mob: &mut Mob, report: &CollisionReport) {
    if !report.blocked_horizontally() || mob.state != MobState::Wander {
        return;
    }
    let yaw = mob.yaw + std::f32::consts::PI + (mob.rng.f32() - 0.5);
    mob.yaw = yaw;
    set_horizontal(mob, heading_vector(yaw) * mob.kind.walk_speed());
}

/// Idle and wander handling shared by every kind.
fn roam(mob: &mut Mob, dt: f32) {
    match mob.state {
        MobState::Idle => {
            stop(mob);
            if mob.rng.f32() < WANDER_CHANCE {
                start_wander(mob);
            }
        }
        MobState::Wander => {
            mob.timer -= dt;
            if mob.timer <= 0.0 {
                enter(mob, MobState::Idle);
                stop(mob);
            } else {
                set_horizontal(mob, heading_vector(mob.yaw) * mob.kind.walk_speed());
            }
        }
        // Kinds that never chase fall back to idling.
        MobState::Chase | MobState::Attack => {
            enter(mob, MobState::Idle);
            stop(mob);
        }
    }
}

pub(super) fn start_wander(mob: &mut Mob) {
    enter(mob, MobState::Wander);
    mob.yaw = mob.rng.f32() * TAU;
    mob.timer = WANDER_MIN_SECONDS + mob.rng.f32() * (WANDER_MAX_SECONDS - WANDER_MIN_SECONDS);
    set_horizontal(mob, heading_vector(mob.yaw) * mob.kind.walk_speed());
}

fn pursue(mob: &mut Mob, senses: &Senses) -> Option<f32> {
    let horizontal = senses.to_target.magnitude();
    let direction = if horizontal > f32::EPSILON {
        mob.yaw = yaw_toward(senses.to_target);
        senses.to_target / horizontal
    } else {
        Vector3::new(0.0, 0.0, 0.0)
    };

    if horizontal > STOP_DISTANCE {
        set_horizontal(mob, direction * mob.kind.chase_speed());
    } else if horizontal < SEPARATION_DISTANCE {
        set_horizontal(mob, -direction * mob.kind.walk_speed());
    } else {
        stop(mob);
    }

    if senses.distance > ATTACK_RANGE {
        enter(mob, MobState::Chase);
        return None;
    }

    enter(mob, MobState::Attack);
    if mob.attack_cooldown > 0.0 {
        return None;
    }
    mob.attack_cooldown = ATTACK_COOLDOWN;
    Some(mob.kind.attack_damage())
}

fn enter(mob: &mut Mob, state: MobState) {
    if mob.state != state {
        trace!("{:?} mob: {:?} -> {:?}", mob.kind, mob.state, state);
        mob.state = state;
    }
}

fn set_horizontal(mob: &mut Mob, velocity: Vector3<f32>) {
    mob.body.velocity.x = velocity.x;
    mob.body.velocity.z = velocity.z;
}

fn stop(mob: &mut Mob) {
    set_horizontal(mob, Vector3::new(0.0, 0.0, 0.0));
}
