//! Simulation report generation.

use super::config::{JumpPolicy, SimConfig};
use crate::runner::Variant;
use serde::Serialize;

/// Outcome of one simulated game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunStats {
    /// Displayed score at the end of the run
    pub score: u64,
    pub frames: u64,
    pub cleared: u64,
    pub bonuses: u64,
    pub lives_lost: u32,
    pub jumps: u64,
    pub spawned: u64,
    /// Still alive at the frame cap
    pub survived: bool,
}

/// Aggregated results from multiple simulation runs.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub variant: Variant,
    pub policy: JumpPolicy,
    pub num_runs: u32,
    pub runs_survived: u32,
    pub max_frames_per_run: u64,

    pub avg_score: f64,
    pub median_score: u64,
    pub best_score: u64,
    pub avg_frames: f64,
    pub avg_cleared: f64,
    pub avg_jumps: f64,
    /// Obstacles cleared per obstacle spawned, over all runs
    pub clear_rate: f64,

    /// Individual run stats for detailed analysis
    pub runs: Vec<RunStats>,
}

fn mean(runs: &[RunStats], value: impl Fn(&RunStats) -> u64) -> f64 {
    if runs.is_empty() {
        return 0.0;
    }
    runs.iter().map(|r| value(r) as f64).sum::<f64>() / runs.len() as f64
}

impl SimReport {
    pub fn from_runs(config: &SimConfig, runs: Vec<RunStats>) -> Self {
        let mut scores: Vec<u64> = runs.iter().map(|r| r.score).collect();
        scores.sort_unstable();

        let spawned: u64 = runs.iter().map(|r| r.spawned).sum();
        let cleared: u64 = runs.iter().map(|r| r.cleared).sum();

        Self {
            variant: config.variant,
            policy: config.policy,
            num_runs: runs.len() as u32,
            runs_survived: runs.iter().filter(|r| r.survived).count() as u32,
            max_frames_per_run: config.max_frames_per_run,
            avg_score: mean(&runs, |r| r.score),
            median_score: scores.get(scores.len() / 2).copied().unwrap_or(0),
            best_score: scores.last().copied().unwrap_or(0),
            avg_frames: mean(&runs, |r| r.frames),
            avg_cleared: mean(&runs, |r| r.cleared),
            avg_jumps: mean(&runs, |r| r.jumps),
            clear_rate: if spawned == 0 {
                0.0
            } else {
                cleared as f64 / spawned as f64
            },
            runs,
        }
    }

    /// Generate a human-readable text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                    SIMULATION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Mode: {}   Policy: {:?}\n",
            self.variant.name(),
            self.policy
        ));
        report.push_str(&format!(
            "Runs: {} total, {} survived the {}-frame cap\n\n",
            self.num_runs, self.runs_survived, self.max_frames_per_run
        ));

        report.push_str("── Score ──────────────────────────────────────────────────────\n");
        report.push_str(&format!("  Average:  {:>10.1}\n", self.avg_score));
        report.push_str(&format!("  Median:   {:>10}\n", self.median_score));
        report.push_str(&format!("  Best:     {:>10}\n\n", self.best_score));

        report.push_str("── Play ───────────────────────────────────────────────────────\n");
        let seconds = self.avg_frames * crate::runner::FRAME_MS as f64 / 1000.0;
        report.push_str(&format!(
            "  Avg length:   {:>8.0} frames ({:.1}s)\n",
            self.avg_frames, seconds
        ));
        report.push_str(&format!("  Avg cleared:  {:>8.1}\n", self.avg_cleared));
        report.push_str(&format!("  Avg jumps:    {:>8.1}\n", self.avg_jumps));
        report.push_str(&format!(
            "  Clear rate:   {:>7.1}%\n",
            self.clear_rate * 100.0
        ));

        report
    }

    /// Export report as JSON.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}
