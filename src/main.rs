//! Billiards - headless table simulation
//!
//! Loads the configured table, strikes the cue ball, and runs the physics
//! until every ball is at rest or the frame limit is reached.

use std::error::Error;
use std::process::ExitCode;

use billiards::config::AppConfig;
use billiards::systems::SimulationSystem;
use billiards_core::render_sync::{as_bytes, build_instances};
use billiards_core::{LayoutLoadError, PlaneVec, TableLayout, TableWorld};

fn main() -> ExitCode {
    let (config, config_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    // RUST_LOG still wins over the configured level
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.debug.log_level.as_str()),
    )
    .init();
    log::info!("Starting billiards");
    if let Some(e) = config_error {
        log::warn!("Failed to load config: {}. Using defaults.", e);
    }

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(config: &AppConfig) -> Result<(), Box<dyn Error>> {
    let mut layout = match TableLayout::load(&config.table.layout) {
        Ok(layout) => layout,
        Err(LayoutLoadError::Io(e)) => {
            log::warn!(
                "Could not read table '{}': {}. Using the standard rack.",
                config.table.layout,
                e
            );
            TableLayout::standard()
        }
        Err(e) => return Err(e.into()),
    };
    if let Some(bounds) = config.table.wall_bounds()? {
        layout.wall_bounds = Some(bounds);
    }
    log::info!("Loaded table '{}' with {} balls", layout.name, layout.balls.len());

    let mut table = TableWorld::from_layout(&layout, config.physics.to_material())?;
    if !config.debug.show_arrows {
        table.toggle_arrows();
    }

    let cue_name = table.cue_ball().map(|cue| cue.name.clone());
    match cue_name {
        Some(name) => {
            let [x, z] = config.simulation.break_velocity;
            table.strike(&name, PlaneVec::new(x, z))?;
        }
        None => log::warn!("Table has no cue ball; nothing to strike"),
    }

    let mut sim = SimulationSystem::new();
    let mut contacts = 0;
    let mut wall_hits = 0;
    for _ in 0..config.simulation.max_frames {
        let result = sim.step(&mut table, config.simulation.frame_dt)?;
        contacts += result.contacts;
        wall_hits += result.wall_hits;
        if table.is_settled(config.simulation.settle_threshold) {
            break;
        }
    }

    log::info!(
        "Simulated {} frames ({:.2} s): {} contacts, {} cushion hits",
        sim.frames(),
        sim.frames() as f64 * config.simulation.frame_dt,
        contacts,
        wall_hits
    );
    if !table.is_settled(config.simulation.settle_threshold) {
        log::warn!("Frame limit reached before the table settled");
    }

    for entity in table.entities() {
        if let Some(ball) = table.physics().get_ball(entity.body) {
            log::info!(
                "{:>8}: ({:+.4}, {:+.4}) speed {:.5}",
                entity.name,
                ball.position.x,
                ball.position.z,
                ball.speed()
            );
        }
    }

    let instances = build_instances(&table);
    log::debug!("Instance buffer: {} bytes", as_bytes(&instances).len());
    Ok(())
}
