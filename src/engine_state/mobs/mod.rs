//! # Mobs
//!
//! Simple AI creatures that roam the world and, for hostile kinds, hunt the
//! player.
//!
//! ## Behaviour
//!
//! Every mob runs the same small state machine (idle, wander, chase, attack).
//! Its [`MobKind`] picks the transition function that drives it and an
//! optional hook that reacts when physics blocks its horizontal movement.
//! Transitions and hooks live in [`behavior`].
//!
//! ## Update Order
//!
//! 1. Count down the attack cooldown and the hurt window
//! 2. Unless hurt, run the kind's transition function
//! 3. Apply gravity and resolve collisions, landing on whole block heights
//! 4. Run the kind's collision hook
//! 5. Teleport back to the spawn point if the mob fell out of the world

use cgmath::{InnerSpace, MetricSpace, Point3, Vector3};
use log::{info, trace};

use crate::engine_state::physics::{
    apply_void_safety, move_and_collide, Body, LandingMode, GRAVITY,
};
use crate::engine_state::voxels::world::BlockQuery;

pub mod behavior;

use behavior::{CollisionHook, Senses, Transition};

/// Seconds during which a hit mob ignores its AI.
pub const HURT_SECONDS: f32 = 0.5;
/// Speed of the knockback impulse.
pub const KNOCKBACK_STRENGTH: f32 = 6.0;
/// Upward part of the knockback direction before normalisation.
pub const KNOCKBACK_LIFT: f32 = 0.5;

/// Kinds of mob.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MobKind {
    /// Wanders about and never attacks
    Passive,
    /// Chases and attacks the player
    ZombieLike,
}

impl MobKind {
    /// Width and height of the mob's box.
    pub fn size(self) -> (f32, f32) {
        match self {
            MobKind::Passive => (0.9, 0.9),
            MobKind::ZombieLike => (0.6, 1.8),
        }
    }

    /// Hit points of a fresh mob.
    pub fn max_health(self) -> f32 {
        match self {
            MobKind::Passive => 6.0,
            MobKind::ZombieLike => 10.0,
        }
    }

    /// Wandering speed in blocks per second.
    pub fn walk_speed(self) -> f32 {
        match self {
            MobKind::Passive => 1.2,
            MobKind::ZombieLike => 1.5,
        }
    }

    /// Chasing speed in blocks per second.
    pub fn chase_speed(self) -> f32 {
        match self {
            MobKind::Passive => 1.2,
            MobKind::ZombieLike => 3.0,
        }
    }

    /// Damage dealt by one attack.
    pub fn attack_damage(self) -> f32 {
        match self {
            MobKind::Passive => 0.0,
            MobKind::ZombieLike => 2.0,
        }
    }

    /// The state transition function for this kind.
    pub fn transition(self) -> Transition {
        match self {
            MobKind::Passive => behavior::passive,
            MobKind::ZombieLike => behavior::zombie_like,
        }
    }

    /// Reaction to blocked horizontal movement, if the kind has one.
    pub fn collision_hook(self) -> Option<CollisionHook> {
        match self {
            MobKind::Passive => Some(behavior::turn_around),
            MobKind::ZombieLike => Some(behavior::hop_obstacle),
        }
    }
}

/// Behaviour states.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MobState {
    /// Standing still, occasionally deciding to wander
    Idle,
    /// Walking along `yaw` until the wander timer runs out
    Wander,
    /// Walking toward the player
    Chase,
    /// Close enough to hit the player, holding position
    Attack,
}

/// A single creature.
#[derive(Clone, Debug)]
pub struct Mob {
    /// Selects size, stats and behaviour
    pub kind: MobKind,
    /// Collision box and velocity
    pub body: Body,
    /// Hit points left; the mob dies at zero
    pub health: f32,
    /// Current behaviour state
    pub state: MobState,
    /// Facing angle in radians, 0 facing +Z
    pub yaw: f32,
    /// Where the mob returns to after falling out of the world
    pub spawn_point: Point3<f32>,
    /// Remaining wander time
    timer: f32,
    attack_cooldown: f32,
    hurt_timer: f32,
    dead: bool,
    rng: fastrand::Rng,
}

impl Mob {
    /// Creates a mob of the given kind standing at `position`.
    ///
    /// # Arguments
    /// * `kind` - Kind of mob
    /// * `position` - Position of its feet
    /// * `rng` - The mob's own random source for wandering
    pub fn new(kind: MobKind, position: Point3<f32>, rng: fastrand::Rng) -> Self {
        let (width, height) = kind.size();
        Mob {
            kind,
            body: Body::new(position, width, height),
            health: kind.max_health(),
            state: MobState::Idle,
            yaw: 0.0,
            spawn_point: position,
            timer: 0.0,
            attack_cooldown: 0.0,
            hurt_timer: 0.0,
            dead: false,
            rng,
        }
    }

    /// Position of the mob's feet.
    pub fn position(&self) -> Point3<f32> {
        self.body.position
    }

    /// Whether health has run out. Dead mobs stop updating and wait to be reaped.
    pub fn is_dead(&self) -> bool {
        self.dead
    }

    /// Whether the mob is inside its hurt window. Renderers tint hurt mobs.
    pub fn is_hurt(&self) -> bool {
        self.hurt_timer > 0.0
    }

    /// Advances the mob by one step.
    ///
    /// # Arguments
    /// * `dt` - Seconds since the last step
    /// * `target` - Position of the player's feet
    /// * `world` - Block occupancy
    /// * `on_attack` - Called with the damage of each attack that lands
    pub fn update(
        &mut self,
        dt: f32,
        target: Point3<f32>,
        world: &impl BlockQuery,
        on_attack: &mut dyn FnMut(f32),
    ) {
        if self.dead {
            return;
        }

        self.attack_cooldown = (self.attack_cooldown - dt).max(0.0);

        if self.hurt_timer > 0.0 {
            self.hurt_timer -= dt;
            if self.hurt_timer <= 0.0 {
                self.hurt_timer = 0.0;
                trace!("{:?} mob recovered", self.kind);
            }
        } else {
            let mut to_target = target - self.body.position;
            to_target.y = 0.0;
            let senses = Senses {
                distance: self.body.position.distance(target),
                to_target,
                dt,
            };
            if let Some(damage) = (self.kind.transition())(self, &senses) {
                on_attack(damage);
            }
        }

        if !world.is_loaded(self.body.position) {
            return;
        }

        self.body.velocity.y -= GRAVITY * dt;
        let report = move_and_collide(&mut self.body, dt, world, LandingMode::SnapToGrid);
        if report.blocked_horizontally() {
            if let Some(hook) = self.kind.collision_hook() {
                hook(self, &report);
            }
        }

        apply_void_safety(&mut self.body, self.spawn_point);
    }

    /// Applies a hit from an attacker.
    ///
    /// Starts the hurt window, knocks the mob away from `attacker` and removes
    /// hit points. The mob is marked dead once its health reaches zero.
    ///
    /// # Arguments
    /// * `amount` - Hit points to remove
    /// * `attacker` - Position of whoever dealt the hit
    pub fn take_damage(&mut self, amount: f32, attacker: Point3<f32>) {
        if self.dead {
            return;
        }

        self.health -= amount;
        self.hurt_timer = HURT_SECONDS;

        let mut away = self.body.position - attacker;
        away.y = 0.0;
        let away = if away.magnitude2() > f32::EPSILON {
            away.normalize()
        } else {
            Vector3::new(0.0, 0.0, 0.0)
        };
        self.body.velocity =
            Vector3::new(away.x, KNOCKBACK_LIFT, away.z).normalize() * KNOCKBACK_STRENGTH;
        self.body.on_ground = false;

        if self.health <= 0.0 {
            self.dead = true;
            info!(
                "{:?} mob died at ({:.1}, {:.1}, {:.1})",
                self.kind, self.body.position.x, self.body.position.y, self.body.position.z
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::f32::consts::{FRAC_PI_2, PI};

    use super::*;
    use crate::engine_state::voxels::block::block_type::BlockType;

    /// Solid ground everywhere below y = 0, plus optional extra blocks.
    #[derive(Default)]
    struct Floor(HashSet<(i32, i32, i32)>);

    impl BlockQuery for Floor {
        fn get_block(&self, x: i32, y: i32, z: i32) -> BlockType {
            if y < 0 || self.0.contains(&(x, y, z)) {
                BlockType::STONE
            } else {
                BlockType::AIR
            }
        }
    }

    fn zombie() -> Mob {
        Mob::new(
            MobKind::ZombieLike,
            Point3::new(0.5, 0.0, 0.5),
            fastrand::Rng::with_seed(7),
        )
    }

    fn ignore(_: f32) {}

    #[test]
    fn idle_mob_starts_chasing_nearby_target() {
        let mut mob = zombie();
        mob.update(0.016, Point3::new(10.5, 0.0, 0.5), &Floor::default(), &mut ignore);

        assert_eq!(mob.state, MobState::Chase);
        assert!(mob.body.velocity.x > 0.0);
    }

    #[test]
    fn chasing_mob_gives_up_on_distant_target() {
        let world = Floor::default();
        let mut mob = zombie();
        mob.update(0.016, Point3::new(10.5, 0.0, 0.5), &world, &mut ignore);
        assert_eq!(mob.state, MobState::Chase);

        let here = mob.position();
        mob.update(0.016, here + Vector3::new(25.0, 0.0, 0.0), &world, &mut ignore);

        assert_eq!(mob.state, MobState::Idle);
        assert_eq!(mob.body.velocity, Vector3::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn chase_holds_inside_hysteresis_band() {
        let world = Floor::default();
        let mut mob = zombie();
        mob.update(0.016, Point3::new(10.5, 0.0, 0.5), &world, &mut ignore);

        let here = mob.position();
        mob.update(0.016, here + Vector3::new(17.0, 0.0, 0.0), &world, &mut ignore);
        assert_eq!(mob.state, MobState::Chase);
    }

    #[test]
    fn attacks_respect_cooldown() {
        let world = Floor::default();
        let mut mob = zombie();
        let target = Point3::new(2.5, 0.0, 0.5);
        let mut hits = Vec::new();

        mob.update(0.1, target, &world, &mut |damage| hits.push(damage));
        assert_eq!(mob.state, MobState::Attack);
        assert_eq!(hits, vec![2.0]);

        mob.update(0.1, target, &world, &mut |damage| hits.push(damage));
        assert_eq!(hits.len(), 1);

        mob.update(behavior::ATTACK_COOLDOWN, target, &world, &mut |damage| {
            hits.push(damage)
        });
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn hurt_window_suppresses_ai() {
        let world = Floor::default();
        let mut mob = zombie();
        let attacker = Point3::new(10.5, 0.0, 0.5);

        mob.take_damage(3.0, attacker);
        assert!(mob.is_hurt());
        assert_eq!(mob.health, 7.0);
        assert!(mob.body.velocity.x < 0.0);
        assert!(mob.body.velocity.y > 0.0);

        mob.update(0.1, attacker, &world, &mut ignore);
        assert_eq!(mob.state, MobState::Idle);
        assert!(mob.body.velocity.x < 0.0);

        mob.update(0.5, attacker, &world, &mut ignore);
        assert!(!mob.is_hurt());

        let near = mob.position() + Vector3::new(5.0, 0.0, 0.0);
        mob.update(0.016, near, &world, &mut ignore);
        assert_eq!(mob.state, MobState::Chase);
    }

    #[test]
    fn lethal_damage_marks_dead() {
        let mut mob = zombie();
        mob.take_damage(4.0, Point3::new(0.0, 0.0, 0.0));
        assert!(!mob.is_dead());
        mob.take_damage(6.0, Point3::new(0.0, 0.0, 0.0));
        assert!(mob.is_dead());

        let before = mob.position();
        mob.update(0.1, before, &Floor::default(), &mut ignore);
        assert_eq!(mob.position(), before);
    }

    #[test]
    fn passive_mob_never_chases() {
        let world = Floor::default();
        let mut mob = Mob::new(
            MobKind::Passive,
            Point3::new(0.5, 0.0, 0.5),
            fastrand::Rng::with_seed(3),
        );
        let mut attacked = false;
        for _ in 0..120 {
            let target = mob.position() + Vector3::new(3.0, 0.0, 0.0);
            mob.update(0.016, target, &world, &mut |_| attacked = true);
            assert!(matches!(mob.state, MobState::Idle | MobState::Wander));
        }
        assert!(!attacked);
    }

    #[test]
    fn idle_passive_mob_eventually_wanders() {
        let world = Floor::default();
        let mut mob = Mob::new(
            MobKind::Passive,
            Point3::new(0.5, 0.0, 0.5),
            fastrand::Rng::with_seed(5),
        );
        let far = Point3::new(100.5, 0.0, 0.5);

        let mut ticks = 0;
        while mob.state == MobState::Idle && ticks < 5000 {
            mob.update(0.016, far, &world, &mut ignore);
            ticks += 1;
        }

        assert_eq!(mob.state, MobState::Wander);
        assert!(mob.timer >= behavior::WANDER_MIN_SECONDS);
        assert!(mob.timer <= behavior::WANDER_MAX_SECONDS);
        let expected = behavior::heading_vector(mob.yaw) * MobKind::Passive.walk_speed();
        assert!((mob.body.velocity.x - expected.x).abs() < 1e-5);
        assert!((mob.body.velocity.z - expected.z).abs() < 1e-5);
    }

    #[test]
    fn wandering_passive_mob_turns_away_from_wall() {
        let world = Floor(HashSet::from([(1, 0, 0)]));
        let mut mob = Mob::new(
            MobKind::Passive,
            Point3::new(0.5, 0.0, 0.5),
            fastrand::Rng::with_seed(9),
        );
        behavior::start_wander(&mut mob);
        mob.yaw = FRAC_PI_2;

        mob.update(0.1, Point3::new(0.5, 0.0, 50.0), &world, &mut ignore);

        assert_eq!(mob.state, MobState::Wander);
        assert!(mob.position().x < 0.55);
        let turned = mob.yaw - (FRAC_PI_2 + PI);
        assert!(turned.abs() <= 0.5);
        assert!(mob.body.velocity.x < -1.0);
    }

    #[test]
    fn wander_ends_in_idle_with_zero_velocity() {
        let world = Floor::default();
        let mut mob = Mob::new(
            MobKind::Passive,
            Point3::new(0.5, 0.0, 0.5),
            fastrand::Rng::with_seed(11),
        );
        behavior::start_wander(&mut mob);
        assert_eq!(mob.state, MobState::Wander);
        assert!(mob.timer >= behavior::WANDER_MIN_SECONDS);
        assert!(mob.timer <= behavior::WANDER_MAX_SECONDS);

        let far = Point3::new(100.0, 0.0, 100.0);
        mob.update(behavior::WANDER_MAX_SECONDS + 0.1, far, &world, &mut ignore);

        assert_eq!(mob.state, MobState::Idle);
        assert_eq!(mob.body.velocity.x, 0.0);
        assert_eq!(mob.body.velocity.z, 0.0);
    }

    #[test]
    fn mobs_land_on_whole_block_heights() {
        let world = Floor::default();
        let mut mob = zombie();
        mob.body.position.y = 0.03;
        let far = Point3::new(100.0, 0.0, 100.0);

        mob.update(0.05, far, &world, &mut ignore);

        assert!(mob.body.on_ground);
        assert_eq!(mob.body.position.y, 0.0);
    }

    #[test]
    fn zombie_hops_when_blocked() {
        let mut world = Floor::default();
        world.0.insert((1, 0, 0));
        let mut mob = zombie();
        mob.body.on_ground = true;
        mob.body.position.x = 0.65;

        mob.update(0.05, Point3::new(8.5, 0.0, 0.5), &world, &mut ignore);

        assert_eq!(mob.body.velocity.y, behavior::JUMP_SPEED);
    }

    #[test]
    fn fallen_mob_returns_to_spawn() {
        let mut mob = zombie();
        mob.body.position.y = -60.0;
        mob.update(0.016, Point3::new(100.0, 0.0, 100.0), &Floor::default(), &mut ignore);
        assert_eq!(mob.position(), mob.spawn_point);
    }
}
