//! Simulation configuration.

use crate::runner::Variant;
use crate::utils::errors::{ConfigError, ConfigResult};
use serde::Serialize;

/// How the autopilot works the jump key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JumpPolicy {
    /// Never jumps. Baseline for how quickly obstacles arrive.
    Idle,
    /// Press and release on the same frame: the shortest jump.
    Tap,
    /// Keep the key down until the hold budget runs out.
    #[default]
    Hold,
}

impl JumpPolicy {
    pub fn from_name(name: &str) -> ConfigResult<Self> {
        match name.to_ascii_lowercase().as_str() {
            "idle" => Ok(Self::Idle),
            "tap" => Ok(Self::Tap),
            "hold" => Ok(Self::Hold),
            _ => Err(ConfigError::argument(
                format!("--policy={}", name),
                "expected idle, tap or hold",
            )),
        }
    }
}

/// Configuration for a batch of simulated runs.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of simulation runs to perform
    pub num_runs: u32,

    /// Random seed for reproducibility (None = random). Run `i` uses `seed + i`.
    pub seed: Option<u64>,

    /// Frames before a run is stopped as a survivor
    pub max_frames_per_run: u64,

    pub variant: Variant,
    pub policy: JumpPolicy,

    /// Gap (field units) between the player and the next obstacle at which
    /// the autopilot jumps.
    pub trigger_distance: f64,

    /// Log verbosity (0 = silent, 1 = summary, 2 = per run)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 200,
            seed: None,
            // About five minutes of play at 16ms frames
            max_frames_per_run: 18_750,
            variant: Variant::default(),
            policy: JumpPolicy::default(),
            trigger_distance: 45.0,
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// Small batch for a quick balance check.
    pub fn quick(variant: Variant) -> Self {
        Self {
            num_runs: 50,
            max_frames_per_run: 5_000,
            variant,
            ..Default::default()
        }
    }
}
