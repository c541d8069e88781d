//! Headless runs of the real engine driven by the autopilot.

use super::autopilot::Autopilot;
use super::config::SimConfig;
use super::report::{RunStats, SimReport};
use crate::runner::{GameEngine, FRAME_MS};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Run the full simulation and return a report.
pub fn run_simulation(config: &SimConfig) -> SimReport {
    let mut all_runs = Vec::with_capacity(config.num_runs as usize);

    for run_idx in 0..config.num_runs {
        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed.wrapping_add(u64::from(run_idx))),
            None => ChaCha8Rng::from_entropy(),
        };

        let stats = simulate_single_run(config, &mut rng);
        if config.verbosity >= 2 {
            println!(
                "Run {}/{} - score {}, frames {}, cleared {}, lives lost {}{}",
                run_idx + 1,
                config.num_runs,
                stats.score,
                stats.frames,
                stats.cleared,
                stats.lives_lost,
                if stats.survived { " (survived)" } else { "" }
            );
        }
        all_runs.push(stats);
    }

    SimReport::from_runs(config, all_runs)
}

/// Play one game until it ends or hits the frame cap.
pub fn simulate_single_run(config: &SimConfig, rng: &mut ChaCha8Rng) -> RunStats {
    let engine_config = config.variant.config();
    let starting_lives = engine_config.initial_lives;
    let mut engine = GameEngine::new(engine_config);
    let mut pilot = Autopilot::new(config.policy, config.trigger_distance);

    let mut frame = 0;
    while frame < config.max_frames_per_run && !engine.is_over() {
        frame += 1;
        let input = pilot.step(&mut engine);
        engine.tick(frame * FRAME_MS, input, rng);
    }

    let stats = engine.field_stats();
    RunStats {
        score: engine.displayed_score(),
        frames: frame,
        cleared: engine.cleared(),
        bonuses: u64::from(engine.score().bonuses()),
        lives_lost: starting_lives - engine.lives(),
        jumps: pilot.jumps(),
        spawned: stats.spawned,
        survived: !engine.is_over(),
    }
}
