//! Distance score plus per-obstacle bonuses.

/// Raw points accrue one per frame; the player sees `raw / divisor`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreKeeper {
    raw: u64,
    bonuses: u32,
}

impl ScoreKeeper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tick(&mut self) {
        self.raw += 1;
    }

    pub fn award_bonus(&mut self, points: u64) {
        self.raw += points;
        self.bonuses += 1;
    }

    pub fn raw(&self) -> u64 {
        self.raw
    }

    /// Number of bonuses paid out.
    pub fn bonuses(&self) -> u32 {
        self.bonuses
    }

    pub fn displayed(&self, divisor: u64) -> u64 {
        self.raw / divisor.max(1)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
