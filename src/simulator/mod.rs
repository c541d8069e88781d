//! Balance simulator.
//!
//! Plays many headless games with a scripted jumper to compare rule sets:
//! - How long a run lasts under each variant
//! - How often obstacles are cleared
//! - What the hold and ceiling-hover rules are worth in score
//!
//! The autopilot drives the same `GameEngine` the terminal game uses, so
//! results follow real gameplay.

mod autopilot;
mod config;
mod report;
mod runner;

pub use autopilot::Autopilot;
pub use config::{JumpPolicy, SimConfig};
pub use report::{RunStats, SimReport};
pub use runner::{run_simulation, simulate_single_run};
