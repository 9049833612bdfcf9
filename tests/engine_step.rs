use std::f32::consts::FRAC_PI_2;

use cgmath::{Point3, Vector2};
use noise::Constant;
use voxel_sandbox::engine_state::{
    mobs::{MobKind, MobState},
    persistence::{MemoryStore, WorldStore},
    rendering::HeadlessScene,
    voxels::{
        block::block_type::BlockType,
        chunk::{
            chunk_creation::{DecorationRng, TerrainGenerator},
            ChunkKey,
        },
    },
};
use voxel_sandbox::{BlockPlacement, EngineState, GameConfig, PlayerIntent};
use web_time::Duration;

const FRAME: Duration = Duration::from_millis(16);

struct NoTrees;

impl DecorationRng for NoTrees {
    fn roll(&mut self) -> f64 {
        1.0
    }

    fn trunk_height(&mut self) -> i32 {
        4
    }
}

/// Flat grass at y = 4 with the player standing on it.
fn flat_engine() -> EngineState {
    let config = GameConfig {
        spawn_point: [8.5, 5.0, 8.5],
        ..GameConfig::default()
    };
    EngineState::with_generator(
        config,
        TerrainGenerator::with_sources(Constant::new(0.0), NoTrees),
    )
}

fn walk_east() -> PlayerIntent {
    PlayerIntent {
        movement: Vector2::new(0.0, 1.0),
        yaw: FRAC_PI_2,
        ..PlayerIntent::default()
    }
}

#[test]
fn walking_across_a_chunk_border_streams_one_column_row() {
    let mut engine = flat_engine();
    let mut scene = HeadlessScene::new();

    engine.step(FRAME, &PlayerIntent::default(), &mut |_| {});
    engine.flush_scene_commands(&mut scene);
    assert_eq!(scene.len(), 49);
    assert!(scene.mesh(ChunkKey::new(-3, 3)).is_some());

    while engine.player().position().x < 16.5 {
        engine.step(FRAME, &walk_east(), &mut |_| {});
        engine.flush_scene_commands(&mut scene);
    }

    assert_eq!(engine.world().chunk_count(), 49);
    assert_eq!(scene.len(), 49);
    assert_eq!(scene.inserts, 56);
    assert_eq!(scene.disposals, 7);
    assert!(scene.mesh(ChunkKey::new(-3, 3)).is_none());
    assert!(scene.mesh(ChunkKey::new(4, 3)).is_some());

    // Flat ground: the player never left the surface.
    assert!(engine.player().body.on_ground);
    assert_eq!(engine.player().position().y, 5.0);
}

#[test]
fn dig_build_save_and_resume() {
    let mut engine = flat_engine();
    engine.step(FRAME, &PlayerIntent::default(), &mut |_| {});

    let dig = PlayerIntent {
        break_block: Some(Point3::new(10, 4, 8)),
        ..PlayerIntent::default()
    };
    let outcome = engine.step(FRAME, &dig, &mut |_| {});
    assert_eq!(outcome.broken, Some(BlockType::GRASS));

    let dig_deeper = PlayerIntent {
        break_block: Some(Point3::new(10, 3, 8)),
        ..PlayerIntent::default()
    };
    let outcome = engine.step(FRAME, &dig_deeper, &mut |_| {});
    assert_eq!(outcome.broken, Some(BlockType::DIRT));

    let build = PlayerIntent {
        place: Some(BlockPlacement {
            target: Point3::new(8, 5, 11),
            block_type: BlockType::DIRT,
        }),
        ..PlayerIntent::default()
    };
    let outcome = engine.step(FRAME, &build, &mut |_| {});
    assert_eq!(outcome.placed, Some(BlockType::DIRT));
    assert_eq!(engine.world().get_block(8, 5, 11), BlockType::DIRT);

    let inventory = engine.inventory();
    assert_eq!(inventory.count_of(BlockType::GRASS), 1);
    assert_eq!(inventory.count_of(BlockType::DIRT), 0);

    let mut store = MemoryStore::default();
    engine.save(&mut store).unwrap();
    let saved = store.load_world().unwrap().unwrap();
    assert_eq!(saved.player_position, [8.5, 5.0, 8.5]);

    let mut resumed = flat_engine();
    assert!(resumed.load(&store).unwrap());
    assert_eq!(resumed.inventory(), engine.inventory());
    resumed.step(FRAME, &PlayerIntent::default(), &mut |_| {});
    assert!(resumed.player().body.on_ground);
}

#[test]
fn zombie_hunts_and_player_fights_back() {
    let mut engine = flat_engine();
    engine.step(FRAME, &PlayerIntent::default(), &mut |_| {});
    engine.spawn_mob(MobKind::ZombieLike, Point3::new(16.5, 5.0, 8.5));

    // Closing six blocks at chase speed takes about two seconds.
    let mut damage = 0.0;
    for _ in 0..200 {
        engine.step(FRAME, &PlayerIntent::default(), &mut |amount| damage += amount);
    }
    assert_eq!(engine.mobs()[0].state, MobState::Attack);
    assert!(damage >= 2.0);

    let swing = PlayerIntent {
        attack: true,
        ..PlayerIntent::default()
    };
    let mut killed = Vec::new();
    for _ in 0..10 {
        let outcome = engine.step(FRAME, &swing, &mut |_| {});
        killed.extend(engine.drain_dead_mobs());
        if !killed.is_empty() {
            break;
        }
        assert!(outcome.mob_hit);
    }

    assert_eq!(killed.len(), 1);
    assert!(engine.mobs().is_empty());
}
