//! Scripted player used by the simulator.

use super::config::JumpPolicy;
use crate::runner::{GameEngine, InputFlags};

/// Jumps when the next obstacle comes within range, working the jump key
/// the way [`JumpPolicy`] says.
#[derive(Debug, Clone)]
pub struct Autopilot {
    policy: JumpPolicy,
    trigger_distance: f64,
    held: bool,
    jumps: u64,
}

impl Autopilot {
    pub fn new(policy: JumpPolicy, trigger_distance: f64) -> Self {
        Self {
            policy,
            trigger_distance,
            held: false,
            jumps: 0,
        }
    }

    pub fn jumps(&self) -> u64 {
        self.jumps
    }

    /// Gap between the player's right edge and the nearest obstacle that has
    /// not yet passed the player.
    pub fn gap_to_next(engine: &GameEngine) -> Option<f64> {
        let config = engine.config();
        let player_right = config.player_x + config.player_width;
        engine
            .obstacles()
            .obstacles()
            .iter()
            .find(|o| o.right() > config.player_x)
            .map(|o| o.x - player_right)
    }

    /// Drive the engine's jump key for the coming frame and return the
    /// input to tick with.
    pub fn step(&mut self, engine: &mut GameEngine) -> InputFlags {
        if self.policy == JumpPolicy::Idle {
            return InputFlags::default();
        }

        let config = engine.config();
        let physics = engine.physics();
        if self.held
            && (!physics.jumping
                || physics.hold_released
                || physics.hold_ticks >= config.max_jump_hold)
        {
            engine.release_jump();
            self.held = false;
        }

        let in_range = Self::gap_to_next(engine)
            .is_some_and(|gap| (0.0..=self.trigger_distance).contains(&gap));
        if in_range && engine.request_jump() {
            self.jumps += 1;
            match self.policy {
                JumpPolicy::Tap => engine.release_jump(),
                JumpPolicy::Hold => self.held = true,
                JumpPolicy::Idle => {}
            }
        }

        InputFlags {
            jump_held: self.held,
        }
    }
}
