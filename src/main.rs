//! Hyperdrive - headless 4D driving engine
//!
//! Loads a scene, drives the car from the configured input script and logs
//! what happened. Usage: `hyperdrive [scene.ron]`

use hyperdrive::config::AppConfig;
use hyperdrive::systems::SimulationSystem;
use hyperdrive_core::{SceneValidator, SimulationState};

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut config = AppConfig::load().unwrap_or_else(|e| {
        log::warn!("Failed to load config: {}. Using defaults.", e);
        AppConfig::default()
    });

    if let Some(path) = std::env::args().nth(1) {
        config.scene.path = path;
    }

    let scene = SceneValidator::load_checked(&config.scene.path)
        .map_err(|e| format!("Failed to load scene '{}': {}", config.scene.path, e))?;

    let state = SimulationState::from_scene(&scene);
    log::info!(
        "Running '{}' for {} ticks ({} scripted), bounds: {:?}, cross-section: {:?}",
        scene.name,
        config.simulation.ticks,
        config.simulation.script.total_ticks(),
        state.bounds_policy(&config.physics),
        config.physics.cross_section
    );

    let system = SimulationSystem::new(config.physics.clone(), config.simulation.script.clone())
        .with_frame_log_interval(config.debug.frame_log_interval);
    let (state, summary) = system.run(state, config.simulation.ticks)?;

    let p = state.player.position;
    log::info!(
        "Finished at tick {}: pos=({:.2}, {:.2}, {:.2}, {:.2})",
        state.tick,
        p.x,
        p.y,
        p.z,
        p.w
    );
    log::info!(
        "grounded {}/{} ticks, {} launches, {} boosts, {} rings ({} left), {} side hits, {} fence hits, {} respawns",
        summary.grounded_ticks,
        summary.ticks,
        summary.launches,
        summary.boosts,
        summary.rings,
        state.world.rings_remaining(),
        summary.side_hits,
        summary.bounds_hits,
        summary.recoveries
    );
    Ok(())
}

fn main() {
    // Log level comes from RUST_LOG, falling back to the configured level
    let level = AppConfig::load()
        .map(|c| c.debug.log_level)
        .unwrap_or_else(|_| "info".to_string());
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
    log::info!("Starting Hyperdrive");

    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
