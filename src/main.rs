//! Sandglass headless harness
//!
//! Runs a demo loop (two activations per frame at 60 Hz), logs progress
//! once a second, and prints the final snapshot as JSON so external
//! tooling can inspect it.

use sandglass::consts::SIM_DT;
use sandglass::{SimConfig, Simulation};

fn main() {
    env_logger::init();

    let seconds: f32 = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(10.0);

    let config = SimConfig::default();
    let mut sim = match Simulation::new(config) {
        Ok(sim) => sim,
        Err(e) => {
            log::error!("configuration rejected: {e}");
            std::process::exit(1);
        }
    };

    let steps = (seconds / SIM_DT).round().max(0.0) as u64;
    log::info!("sandglass starting: {steps} steps at 60 Hz, seed {}", sim.config().seed);

    let midline = sim.config().vessel.midline_y;
    for step in 1..=steps {
        sim.activate(2);
        let snap = sim.step();

        if step % 60 == 0 {
            let passed = snap.particles.iter().filter(|p| p.pos.y >= midline).count();
            log::info!(
                "t={:.0}s active={} passed_neck={}",
                step as f32 * SIM_DT,
                snap.particles.len(),
                passed
            );
        }
    }

    match serde_json::to_string_pretty(sim.snapshot()) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            log::error!("snapshot serialization failed: {e}");
            std::process::exit(1);
        }
    }
}
