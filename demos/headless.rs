//! Runs the simulation without a window and prints the particle pool.
//!
//! Cycles through the gravity presets to show the freeze/resume behavior.
//!
//! Run with: `cargo run --example headless`

use portal_fluid::prelude::*;

const FRAME: f32 = 1.0 / 60.0;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut config = AppConfig::default();
    config.simulation.seed = Some(2024);
    let mut state: SimulationState = SimulationState::new(&config);
    let mut input = Input::new();
    let mut now = 0.0;

    let schedule = [
        (KeyCode::N, "normal"),
        (KeyCode::X, "frozen"),
        (KeyCode::F, "fast"),
        (KeyCode::S, "slow"),
    ];

    for (key, label) in schedule {
        input.press_key(key);
        for _ in 0..30 {
            now += FRAME;
            state.update(&input, now);
            input.begin_frame();
        }
        input.release_key(key);

        log::info!(
            "{} gravity ({}) after {:.2}s",
            label,
            state.controls.gravity(),
            now
        );
        for (i, p) in state.particles.particles().iter().enumerate() {
            println!(
                "  #{:<2} pos ({:>7.3}, {:>7.3}, {:>7.3})  vel ({:>7.3}, {:>7.3})",
                i, p.position.x, p.position.y, p.position.z, p.velocity.x, p.velocity.y
            );
        }
    }

    let bytes = state.particles.position_bytes();
    log::info!("position buffer: {} bytes", bytes.len());
}
