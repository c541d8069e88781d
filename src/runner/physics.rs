//! Vertical motion of the player: jump impulse, variable-height hold,
//! ceiling hover and ground landing.

use super::collision::Bounds;
use super::config::EngineConfig;

/// Player's vertical state. `y` is the top edge of the player's box, in
/// field units from the top of the field.
#[derive(Debug, Clone, PartialEq)]
pub struct PhysicsState {
    pub y: f64,
    /// Vertical velocity per frame (negative = upward).
    pub velocity: f64,
    pub jumping: bool,
    /// Frames of reduced gravity already spent on this jump.
    pub hold_ticks: u32,
    /// Jump input was let go during this jump; no more reduced gravity until landing.
    pub hold_released: bool,
    /// Consecutive frames spent pinned to the ceiling.
    pub top_hold_ticks: u32,
}

impl PhysicsState {
    /// A player standing on the floor.
    pub fn grounded(config: &EngineConfig) -> Self {
        Self {
            y: config.ground_y(),
            velocity: 0.0,
            jumping: false,
            hold_ticks: 0,
            hold_released: false,
            top_hold_ticks: 0,
        }
    }

    pub fn bounds(&self, config: &EngineConfig) -> Bounds {
        Bounds::new(
            config.player_x,
            self.y,
            config.player_width,
            config.player_height,
        )
    }

    /// Launch a jump. Returns false (and changes nothing) while airborne.
    pub fn start_jump(&mut self, config: &EngineConfig) -> bool {
        if self.jumping {
            return false;
        }
        self.velocity = config.jump_impulse;
        self.jumping = true;
        self.hold_ticks = 0;
        self.hold_released = false;
        true
    }

    /// Jump input went up. The hold budget is spent for the rest of this jump.
    pub fn release_jump(&mut self) {
        self.hold_ticks = 0;
        if self.jumping {
            self.hold_released = true;
        }
    }

    /// Put the player back on the floor with all jump state cleared.
    pub fn land(&mut self, config: &EngineConfig) {
        self.y = config.ground_y();
        self.velocity = 0.0;
        self.jumping = false;
        self.hold_ticks = 0;
        self.hold_released = false;
        self.top_hold_ticks = 0;
    }

    /// Advance one frame.
    ///
    /// Position integrates first, then velocity picks up gravity (reduced while
    /// a fresh jump is held), then the box is clamped into `[0, ground_y]`.
    pub fn tick(&mut self, jump_held: bool, config: &EngineConfig) {
        self.y += self.velocity;

        if self.y <= 0.0 {
            // Pinned to the ceiling: hover, then fall once the budget runs out
            self.y = 0.0;
            if self.top_hold_ticks < config.max_top_hold {
                self.top_hold_ticks += 1;
                self.velocity = 0.0;
            } else {
                self.velocity += config.gravity;
            }
        } else {
            if self.jumping && !jump_held {
                self.hold_released = true;
            }

            if self.jumping
                && jump_held
                && !self.hold_released
                && self.hold_ticks < config.max_jump_hold
            {
                self.velocity += config.gravity * config.jump_hold_factor;
                self.hold_ticks += 1;
            } else {
                self.velocity += config.gravity;
            }
            self.top_hold_ticks = 0;
        }

        if self.y > config.ground_y() {
            self.land(config);
        }
    }

    pub fn is_on_ground(&self, config: &EngineConfig) -> bool {
        !self.jumping && self.y >= config.ground_y()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::config::Variant;

    fn config() -> EngineConfig {
        EngineConfig::default()
    }

    /// Run a full jump with the given hold pattern and return the peak (minimum y).
    fn jump_peak(config: &EngineConfig, held_frames: u32) -> f64 {
        let mut physics = PhysicsState::grounded(config);
        assert!(physics.start_jump(config));
        let mut peak = physics.y;
        for frame in 0..1000 {
            physics.tick(frame < held_frames, config);
            peak = peak.min(physics.y);
            if !physics.jumping {
                break;
            }
        }
        assert!(!physics.jumping, "jump should land");
        peak
    }

    #[test]
    fn test_grounded_defaults() {
        let cfg = config();
        let physics = PhysicsState::grounded(&cfg);
        assert!((physics.y - cfg.ground_y()).abs() < f64::EPSILON);
        assert!(!physics.jumping);
        assert!(physics.is_on_ground(&cfg));
    }

    #[test]
    fn test_idle_player_stays_on_ground() {
        let cfg = config();
        let mut physics = PhysicsState::grounded(&cfg);
        for _ in 0..50 {
            physics.tick(false, &cfg);
            assert!((physics.y - cfg.ground_y()).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn test_start_jump_sets_impulse() {
        let cfg = config();
        let mut physics = PhysicsState::grounded(&cfg);
        assert!(physics.start_jump(&cfg));
        assert!(physics.jumping);
        assert!((physics.velocity - cfg.jump_impulse).abs() < f64::EPSILON);
    }

    #[test]
    fn test_no_double_jump() {
        let cfg = config();
        let mut physics = PhysicsState::grounded(&cfg);
        physics.start_jump(&cfg);
        physics.tick(false, &cfg);
        let before = physics.clone();

        assert!(!physics.start_jump(&cfg));
        assert_eq!(physics, before, "airborne jump request must not change state");
    }

    #[test]
    fn test_first_frame_of_jump() {
        let cfg = Variant::LongJump.config();
        let mut physics = PhysicsState::grounded(&cfg);
        physics.start_jump(&cfg);
        physics.tick(false, &cfg);
        // 280 - 26 = 254, then full gravity
        assert!((physics.y - 254.0).abs() < 1e-9);
        assert!((physics.velocity - (-26.0 + 1.6)).abs() < 1e-9);
    }

    #[test]
    fn test_held_jump_uses_reduced_gravity() {
        let cfg = Variant::LongJump.config();
        let mut physics = PhysicsState::grounded(&cfg);
        physics.start_jump(&cfg);
        physics.tick(true, &cfg);
        assert!((physics.velocity - (-26.0 + 0.8)).abs() < 1e-9);
        assert_eq!(physics.hold_ticks, 1);
    }

    #[test]
    fn test_hold_budget_is_capped() {
        let cfg = Variant::LongJump.config();
        let mut physics = PhysicsState::grounded(&cfg);
        physics.start_jump(&cfg);
        for _ in 0..40 {
            physics.tick(true, &cfg);
            assert!(physics.hold_ticks <= cfg.max_jump_hold);
        }
    }

    #[test]
    fn test_holding_jumps_higher() {
        // Tall field so the ceiling does not interfere
        let cfg = EngineConfig {
            field_height: 2000.0,
            max_top_hold: 0,
            ..EngineConfig::default()
        };
        let tap = jump_peak(&cfg, 0);
        let held = jump_peak(&cfg, 100);
        assert!(held < tap, "held jump peak {} should be above tap peak {}", held, tap);
    }

    #[test]
    fn test_release_ends_hold_until_landing() {
        let cfg = Variant::LongJump.config();
        let mut physics = PhysicsState::grounded(&cfg);
        physics.start_jump(&cfg);
        physics.tick(true, &cfg);
        physics.release_jump();
        assert_eq!(physics.hold_ticks, 0);
        assert!(physics.hold_released);

        // Pressing again mid-air does not restore reduced gravity
        let v = physics.velocity;
        physics.tick(true, &cfg);
        assert!((physics.velocity - (v + cfg.gravity)).abs() < 1e-9);
    }

    #[test]
    fn test_no_hold_when_disabled() {
        let cfg = Variant::Lives.config();
        let mut physics = PhysicsState::grounded(&cfg);
        physics.start_jump(&cfg);
        physics.tick(true, &cfg);
        assert!((physics.velocity - (-26.0 + 1.6)).abs() < 1e-9);
        assert_eq!(physics.hold_ticks, 0);
    }

    #[test]
    fn test_ceiling_clamp_and_hover() {
        let cfg = Variant::TopHold.config();
        let mut physics = PhysicsState::grounded(&cfg);
        physics.start_jump(&cfg);
        physics.y = 10.0;
        physics.tick(true, &cfg);
        assert!((physics.y - 0.0).abs() < f64::EPSILON);
        assert!((physics.velocity - 0.0).abs() < f64::EPSILON);
        assert_eq!(physics.top_hold_ticks, 1);

        // Hovers for the whole budget, held or not
        for _ in 1..cfg.max_top_hold {
            physics.tick(false, &cfg);
            assert!((physics.y - 0.0).abs() < f64::EPSILON);
        }
        assert_eq!(physics.top_hold_ticks, cfg.max_top_hold);

        // Budget spent: gravity pulls the player off the ceiling
        physics.tick(false, &cfg);
        assert!((physics.velocity - cfg.gravity).abs() < 1e-9);
        physics.tick(false, &cfg);
        assert!(physics.y > 0.0);
        assert_eq!(physics.top_hold_ticks, 0);
    }

    #[test]
    fn test_full_hold_reaches_ceiling_but_tap_does_not() {
        let cfg = Variant::TopHold.config();
        let tap = jump_peak(&cfg, 0);
        assert!(tap > 0.0, "tap jump should stay below the ceiling, peak {}", tap);

        let mut physics = PhysicsState::grounded(&cfg);
        physics.start_jump(&cfg);
        let mut touched = false;
        for _ in 0..60 {
            physics.tick(true, &cfg);
            touched |= physics.top_hold_ticks > 0;
        }
        assert!(touched, "held jump should reach the ceiling");
    }

    #[test]
    fn test_hover_budget_then_gravity() {
        let cfg = EngineConfig {
            max_top_hold: 2,
            ..EngineConfig::default()
        };
        let mut physics = PhysicsState::grounded(&cfg);
        physics.start_jump(&cfg);
        physics.top_hold_ticks = 2;
        physics.y = 5.0;
        physics.velocity = -20.0;

        physics.tick(false, &cfg);
        assert!((physics.y - 0.0).abs() < f64::EPSILON);
        // Budget spent: gravity applies on top of the upward velocity
        assert!((physics.velocity - (-20.0 + cfg.gravity)).abs() < 1e-9);
    }

    #[test]
    fn test_landing_resets_jump_state() {
        let cfg = config();
        let mut physics = PhysicsState::grounded(&cfg);
        physics.start_jump(&cfg);
        physics.hold_ticks = 7;
        physics.hold_released = true;
        physics.y = cfg.ground_y() - 1.0;
        physics.velocity = 10.0;

        physics.tick(false, &cfg);

        assert!((physics.y - cfg.ground_y()).abs() < f64::EPSILON);
        assert!((physics.velocity - 0.0).abs() < f64::EPSILON);
        assert!(!physics.jumping);
        assert_eq!(physics.hold_ticks, 0);
        assert!(!physics.hold_released);
        assert_eq!(physics.top_hold_ticks, 0);
    }

    #[test]
    fn test_y_stays_in_field_for_every_variant() {
        for variant in Variant::ALL {
            let cfg = variant.config();
            let mut physics = PhysicsState::grounded(&cfg);
            for frame in 0..2000u32 {
                if frame % 90 == 0 {
                    physics.start_jump(&cfg);
                }
                physics.tick(frame % 90 < 40, &cfg);
                assert!(
                    physics.y >= 0.0 && physics.y <= cfg.ground_y(),
                    "{:?} frame {}: y = {}",
                    variant,
                    frame,
                    physics.y
                );
            }
        }
    }
}
