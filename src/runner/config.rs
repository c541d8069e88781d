//! Engine tuning and the four rule-set presets.
//!
//! The game grew through four iterations: collide-and-die, then lives with a
//! short invincibility window, then a variable-height jump, then a hold at
//! the top of the field. Each iteration is a [`Variant`] whose
//! [`Variant::config`] fills an [`EngineConfig`]; the engine itself has no
//! per-variant code paths.

use crate::utils::errors::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};

/// Rule-set presets, oldest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// First collision ends the run.
    Classic,
    /// Three lives with a one second grace window after each hit.
    Lives,
    /// Holding jump halves gravity for a few frames; passing obstacles pays a bonus.
    LongJump,
    /// Long jump plus a hover at the top of the field.
    #[default]
    TopHold,
}

impl Variant {
    pub const ALL: [Variant; 4] = [
        Variant::Classic,
        Variant::Lives,
        Variant::LongJump,
        Variant::TopHold,
    ];

    pub fn from_index(index: usize) -> Self {
        Self::ALL.get(index).copied().unwrap_or_default()
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Classic => "Classic",
            Self::Lives => "Lives",
            Self::LongJump => "Long Jump",
            Self::TopHold => "Top Hold",
        }
    }

    /// Lowercase identifier used on the command line and in settings files.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Classic => "classic",
            Self::Lives => "lives",
            Self::LongJump => "longjump",
            Self::TopHold => "tophold",
        }
    }

    /// Parse a variant key. Dashes, underscores and case are ignored.
    pub fn from_name(name: &str) -> ConfigResult<Self> {
        let normalized: String = name
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .flat_map(char::to_lowercase)
            .collect();
        Self::ALL
            .into_iter()
            .find(|v| v.key() == normalized)
            .ok_or_else(|| ConfigError::UnknownVariant(name.to_string()))
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Classic => "One hit and it's over",
            Self::Lives => "3 lives, 1s invincibility after a hit",
            Self::LongJump => "Hold jump to go higher, +100 per obstacle cleared",
            Self::TopHold => "Long jump that hovers at the ceiling",
        }
    }

    pub fn config(&self) -> EngineConfig {
        let base = EngineConfig::default();
        match self {
            Self::Classic => EngineConfig {
                initial_lives: 1,
                max_jump_hold: 0,
                max_top_hold: 0,
                bonus_enabled: false,
                obstacle_width: 40.0,
                obstacle_min_height: 60.0,
                obstacle_height_range: 100.0,
                ..base
            },
            Self::Lives => EngineConfig {
                max_jump_hold: 0,
                max_top_hold: 0,
                bonus_enabled: false,
                obstacle_width: 40.0,
                obstacle_min_height: 60.0,
                obstacle_height_range: 100.0,
                ..base
            },
            Self::LongJump => EngineConfig {
                max_top_hold: 0,
                ..base
            },
            Self::TopHold => base,
        }
    }
}

/// Every tunable the engine reads. Distances are field units (the field is
/// `field_width` x `field_height`, y grows downward), times are frames unless
/// the name says otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub field_width: f64,
    pub field_height: f64,

    pub player_x: f64,
    pub player_width: f64,
    pub player_height: f64,

    /// Added to the vertical velocity every frame (positive = downward).
    pub gravity: f64,
    /// Velocity set when a jump starts (negative = upward).
    pub jump_impulse: f64,
    /// Frames of reduced gravity while jump is held. 0 disables long jumps.
    pub max_jump_hold: u32,
    /// Gravity multiplier applied during the hold.
    pub jump_hold_factor: f64,
    /// Frames the player may hover at the ceiling. 0 disables the hover.
    pub max_top_hold: u32,

    pub obstacle_width: f64,
    pub obstacle_min_height: f64,
    pub obstacle_height_range: f64,
    /// Gap between the field floor and an obstacle's base.
    pub obstacle_lift: f64,
    /// Per-frame probability of spawning an obstacle.
    pub spawn_chance: f64,
    /// Leftward obstacle movement per frame.
    pub scroll_speed: f64,

    pub initial_lives: u32,
    pub invincibility_ms: u64,

    pub bonus_enabled: bool,
    /// Raw points per cleared obstacle.
    pub bonus_points: u64,
    /// Raw score is divided by this for display.
    pub score_divisor: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            field_width: 800.0,
            field_height: 300.0,

            player_x: 50.0,
            player_width: 20.0,
            player_height: 20.0,

            gravity: 1.6,
            jump_impulse: -26.0,
            max_jump_hold: 15,
            jump_hold_factor: 0.5,
            max_top_hold: 300,

            obstacle_width: 20.0,
            obstacle_min_height: 30.0,
            obstacle_height_range: 50.0,
            obstacle_lift: 0.0,
            spawn_chance: 0.02,
            scroll_speed: 5.0,

            initial_lives: 3,
            invincibility_ms: 1000,

            bonus_enabled: true,
            bonus_points: 1000,
            score_divisor: 10,
        }
    }
}

impl EngineConfig {
    /// Player's resting y (top edge) when standing on the floor.
    pub fn ground_y(&self) -> f64 {
        self.field_height - self.player_height
    }

    /// Reject parameter combinations the engine cannot honor.
    pub fn validate(&self) -> ConfigResult<()> {
        positive("field_width", self.field_width)?;
        positive("field_height", self.field_height)?;
        positive("player_width", self.player_width)?;
        positive("player_height", self.player_height)?;
        positive("obstacle_width", self.obstacle_width)?;
        positive("obstacle_min_height", self.obstacle_min_height)?;
        positive("gravity", self.gravity)?;
        positive("scroll_speed", self.scroll_speed)?;

        if self.player_height > self.field_height {
            return Err(ConfigError::invalid(
                "player_height",
                format!("{} does not fit a field {} tall", self.player_height, self.field_height),
            ));
        }
        if self.player_x < 0.0 || self.player_x + self.player_width > self.field_width {
            return Err(ConfigError::invalid(
                "player_x",
                "player must lie inside the field horizontally",
            ));
        }
        if self.jump_impulse >= 0.0 || self.jump_impulse.is_nan() {
            return Err(ConfigError::invalid("jump_impulse", "must be negative (upward)"));
        }
        if !(0.0..=1.0).contains(&self.jump_hold_factor) {
            return Err(ConfigError::invalid("jump_hold_factor", "must be within [0, 1]"));
        }
        if !(0.0..=1.0).contains(&self.spawn_chance) {
            return Err(ConfigError::invalid("spawn_chance", "must be within [0, 1]"));
        }
        if self.obstacle_height_range < 0.0 || self.obstacle_height_range.is_nan() {
            return Err(ConfigError::invalid("obstacle_height_range", "must not be negative"));
        }
        if self.obstacle_lift < 0.0 || self.obstacle_lift.is_nan() {
            return Err(ConfigError::invalid("obstacle_lift", "must not be negative"));
        }
        if self.initial_lives == 0 {
            return Err(ConfigError::invalid("initial_lives", "must be at least 1"));
        }
        if self.score_divisor == 0 {
            return Err(ConfigError::invalid("score_divisor", "must be at least 1"));
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f64) -> ConfigResult<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("must be positive, got {}", value)))
    }
}

/// Partial config from a settings file, laid over a variant preset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineOverrides {
    pub field_width: Option<f64>,
    pub field_height: Option<f64>,
    pub player_x: Option<f64>,
    pub player_width: Option<f64>,
    pub player_height: Option<f64>,
    pub gravity: Option<f64>,
    pub jump_impulse: Option<f64>,
    pub max_jump_hold: Option<u32>,
    pub jump_hold_factor: Option<f64>,
    pub max_top_hold: Option<u32>,
    pub obstacle_width: Option<f64>,
    pub obstacle_min_height: Option<f64>,
    pub obstacle_height_range: Option<f64>,
    pub obstacle_lift: Option<f64>,
    pub spawn_chance: Option<f64>,
    pub scroll_speed: Option<f64>,
    pub initial_lives: Option<u32>,
    pub invincibility_ms: Option<u64>,
    pub bonus_enabled: Option<bool>,
    pub bonus_points: Option<u64>,
    pub score_divisor: Option<u64>,
}

macro_rules! overlay {
    ($overrides:expr, $config:expr, $($field:ident),+ $(,)?) => {
        $(
            if let Some(value) = $overrides.$field {
                $config.$field = value;
            }
        )+
    };
}

impl EngineOverrides {
    pub fn apply(&self, mut config: EngineConfig) -> EngineConfig {
        overlay!(
            self,
            config,
            field_width,
            field_height,
            player_x,
            player_width,
            player_height,
            gravity,
            jump_impulse,
            max_jump_hold,
            jump_hold_factor,
            max_top_hold,
            obstacle_width,
            obstacle_min_height,
            obstacle_height_range,
            obstacle_lift,
            spawn_chance,
            scroll_speed,
            initial_lives,
            invincibility_ms,
            bonus_enabled,
            bonus_points,
            score_divisor,
        );
        config
    }
}
