//! # Voxel Sandbox Demo
//!
//! Runs a headless session: spawns mobs, walks the player around for a few
//! seconds at 60 steps per second and logs what happened. Scene commands go to
//! a counting scene instead of a GPU.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run --release -- [config.json]
//! ```
//!
//! The player's position and inventory are saved to `voxel_sandbox_save.json`
//! in the working directory and restored on the next run.

#[cfg(not(target_family = "wasm"))]
fn main() -> Result<(), voxel_sandbox::EngineError> {
    use log::{info, warn};
    use voxel_sandbox::engine_state::{
        persistence::FileStore, rendering::HeadlessScene, voxels::block::block_type::BlockType,
    };
    use voxel_sandbox::{EngineState, GameConfig, PlayerIntent};
    use web_time::{Duration, Instant};

    const STEPS_PER_SECOND: u32 = 60;
    const DEMO_SECONDS: u32 = 5;
    const SAVE_FILE: &str = "voxel_sandbox_save.json";

    if let Err(err) = voxel_sandbox::init_logging() {
        eprintln!("Logger unavailable: {err}");
    }

    let config = match std::env::args().nth(1) {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    let mob_count = config.mob_count;

    let mut engine = EngineState::new(config);
    let mut store = FileStore::new(SAVE_FILE);
    match engine.load(&store) {
        Ok(true) => info!("Resumed from {SAVE_FILE}"),
        Ok(false) => {}
        Err(err) => warn!("Ignoring save file: {err}"),
    }

    let spawned = engine.spawn_mobs_around_player(mob_count);
    info!("Spawned {spawned} of {mob_count} mobs");

    let mut scene = HeadlessScene::new();
    let frame = Duration::from_secs(1) / STEPS_PER_SECOND;
    let mut damage_taken = 0.0;
    let mut blocks_broken = 0;
    let mut mobs_killed = 0;

    let stopwatch = Instant::now();
    for tick in 0..STEPS_PER_SECOND * DEMO_SECONDS {
        let seconds = tick as f32 / STEPS_PER_SECOND as f32;
        let position = engine.player().position();
        let yaw = seconds * 0.4;

        // Dig the block ahead of the feet every second.
        let ahead = cgmath::Point3::new(
            (position.x + yaw.sin() * 1.5).floor() as i32,
            position.y.floor() as i32 - 1,
            (position.z + yaw.cos() * 1.5).floor() as i32,
        );
        let intent = PlayerIntent {
            movement: cgmath::Vector2::new(0.0, 1.0),
            yaw,
            jump: tick % 90 == 0,
            attack: tick % 30 == 0,
            break_block: (tick % STEPS_PER_SECOND == 0).then_some(ahead),
            ..PlayerIntent::default()
        };

        let outcome = engine.step(frame, &intent, &mut |damage| damage_taken += damage);
        if outcome.broken.is_some() {
            blocks_broken += 1;
        }
        engine.flush_scene_commands(&mut scene);

        for mob in engine.drain_dead_mobs() {
            mobs_killed += 1;
            info!("{:?} mob killed at {:?}", mob.kind, mob.position());
        }

        if tick % STEPS_PER_SECOND == 0 {
            let position = engine.player().position();
            info!(
                "t={seconds:.0}s player=({:.1}, {:.1}, {:.1}) chunks={} meshes={} faces={} mobs={}",
                position.x,
                position.y,
                position.z,
                engine.world().chunk_count(),
                scene.len(),
                scene.face_count(),
                engine.mobs().len(),
            );
        }
    }

    info!(
        "{} steps in {:?}: {} mesh inserts, {} disposals, {} blocks broken ({} dirt held), {} mobs killed, {:.1} damage taken",
        STEPS_PER_SECOND * DEMO_SECONDS,
        stopwatch.elapsed(),
        scene.inserts,
        scene.disposals,
        blocks_broken,
        engine.inventory().count_of(BlockType::DIRT),
        mobs_killed,
        damage_taken,
    );

    engine.save(&mut store)?;
    Ok(())
}

#[cfg(target_family = "wasm")]
fn main() {}
