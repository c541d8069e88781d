//! Lives, the post-hit grace window, and the run status.
//!
//! The grace window is an expiry timestamp on the engine clock rather than a
//! scheduled callback. Clearing the timestamp on reset is enough to make a
//! previous session's window irrelevant.

/// Whether the run is still going.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameStatus {
    #[default]
    Running,
    Over,
}

/// What a collision did to the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    /// Grace window active; nothing happened.
    Ignored,
    /// A life was lost; the window now runs until `invincible_until` ms.
    LifeLost { remaining: u32, invincible_until: u64 },
    /// The last life was lost.
    GameOver,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifeTracker {
    lives: u32,
    initial: u32,
    invincible_until: Option<u64>,
}

impl LifeTracker {
    pub fn new(initial_lives: u32) -> Self {
        Self {
            lives: initial_lives,
            initial: initial_lives,
            invincible_until: None,
        }
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn is_invincible(&self, now_ms: u64) -> bool {
        self.invincible_until.is_some_and(|until| now_ms < until)
    }

    /// Expiry of the current grace window, if one is open.
    pub fn invincible_until(&self) -> Option<u64> {
        self.invincible_until
    }

    /// Forget an expired window.
    pub fn expire(&mut self, now_ms: u64) {
        if self.invincible_until.is_some_and(|until| now_ms >= until) {
            self.invincible_until = None;
        }
    }

    /// Apply a collision at `now_ms`.
    pub fn hit(&mut self, now_ms: u64, invincibility_ms: u64) -> HitOutcome {
        if self.is_invincible(now_ms) {
            return HitOutcome::Ignored;
        }

        self.lives = self.lives.saturating_sub(1);
        if self.lives == 0 {
            self.invincible_until = None;
            return HitOutcome::GameOver;
        }

        let until = now_ms.saturating_add(invincibility_ms);
        self.invincible_until = Some(until);
        HitOutcome::LifeLost {
            remaining: self.lives,
            invincible_until: until,
        }
    }

    pub fn reset(&mut self) {
        self.lives = self.initial;
        self.invincible_until = None;
    }
}
