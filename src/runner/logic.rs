//! The runner engine: one fixed frame of game rules at a time.

use super::collision::Bounds;
use super::config::EngineConfig;
use super::lives::{GameStatus, HitOutcome, LifeTracker};
use super::obstacles::{FieldStats, Obstacle, ObstacleField};
use super::physics::PhysicsState;
use super::scoring::ScoreKeeper;
use rand::Rng;

/// Input state sampled by the host for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputFlags {
    /// Jump key/touch is currently down.
    pub jump_held: bool,
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSnapshot {
    pub player: Bounds,
    /// Obstacle boxes, spawn order (leftmost first).
    pub obstacles: Vec<Bounds>,
    /// Displayed score (raw score scaled down).
    pub score: u64,
    pub lives: u32,
    pub status: GameStatus,
    pub invincible: bool,
    pub jumping: bool,
    /// Frames processed in this session.
    pub frame: u64,
    /// Increments on every reset.
    pub session: u64,
}

/// Owns all game state for one player. Mutated only through [`tick`],
/// [`request_jump`], [`release_jump`] and [`reset`].
///
/// [`tick`]: GameEngine::tick
/// [`request_jump`]: GameEngine::request_jump
/// [`release_jump`]: GameEngine::release_jump
/// [`reset`]: GameEngine::reset
#[derive(Debug, Clone)]
pub struct GameEngine {
    config: EngineConfig,
    physics: PhysicsState,
    obstacles: ObstacleField,
    score: ScoreKeeper,
    lives: LifeTracker,
    status: GameStatus,
    /// Obstacles the player has got past (bonus paid or not).
    cleared: u64,
    frame: u64,
    session: u64,
    /// Clock value of the most recent tick.
    now_ms: u64,
}

impl GameEngine {
    pub fn new(config: EngineConfig) -> Self {
        let physics = PhysicsState::grounded(&config);
        let lives = LifeTracker::new(config.initial_lives);
        tracing::info!(lives = config.initial_lives, "runner session started");
        Self {
            config,
            physics,
            obstacles: ObstacleField::new(),
            score: ScoreKeeper::new(),
            lives,
            status: GameStatus::Running,
            cleared: 0,
            frame: 0,
            session: 0,
            now_ms: 0,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn physics(&self) -> &PhysicsState {
        &self.physics
    }

    pub fn obstacles(&self) -> &ObstacleField {
        &self.obstacles
    }

    pub fn field_stats(&self) -> FieldStats {
        self.obstacles.stats()
    }

    pub fn score(&self) -> &ScoreKeeper {
        &self.score
    }

    pub fn displayed_score(&self) -> u64 {
        self.score.displayed(self.config.score_divisor)
    }

    pub fn lives(&self) -> u32 {
        self.lives.lives()
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_over(&self) -> bool {
        self.status == GameStatus::Over
    }

    pub fn is_invincible(&self) -> bool {
        self.lives.is_invincible(self.now_ms)
    }

    pub fn cleared(&self) -> u64 {
        self.cleared
    }

    pub fn session(&self) -> u64 {
        self.session
    }

    /// Advance one frame.
    ///
    /// `now_ms` is a monotonic clock reading (engine time, not wall time).
    /// Once the run is over this only returns the frozen final snapshot.
    pub fn tick<R: Rng>(&mut self, now_ms: u64, input: InputFlags, rng: &mut R) -> RenderSnapshot {
        self.now_ms = now_ms;
        if self.status == GameStatus::Over {
            return self.snapshot();
        }

        self.lives.expire(now_ms);
        self.physics.tick(input.jump_held, &self.config);

        self.obstacles.maybe_spawn(&self.config, rng);
        self.obstacles.advance(self.config.scroll_speed);

        let passed = self.obstacles.mark_passed(self.config.player_x);
        self.cleared += u64::from(passed);
        if self.config.bonus_enabled {
            for _ in 0..passed {
                self.score.award_bonus(self.config.bonus_points);
            }
        }

        self.resolve_collision(now_ms);
        self.obstacles.prune_offscreen();

        self.score.tick();
        self.frame += 1;

        self.snapshot()
    }

    /// At most one obstacle can cost a life per frame: the hit either ends the
    /// run or opens the grace window, and both stop further hits this frame.
    fn resolve_collision(&mut self, now_ms: u64) {
        if self.lives.is_invincible(now_ms) {
            return;
        }

        let player = self.physics.bounds(&self.config);
        let Some(hit) = self.obstacles.take_collision(&player) else {
            return;
        };

        match self.lives.hit(now_ms, self.config.invincibility_ms) {
            HitOutcome::LifeLost {
                remaining,
                invincible_until,
            } => {
                self.physics.land(&self.config);
                tracing::debug!(
                    remaining,
                    invincible_until,
                    obstacle_x = hit.x,
                    "life lost"
                );
            }
            HitOutcome::GameOver => {
                self.status = GameStatus::Over;
                tracing::info!(
                    score = self.displayed_score(),
                    frames = self.frame,
                    cleared = self.cleared,
                    "game over"
                );
            }
            HitOutcome::Ignored => {}
        }
    }

    /// Jump key went down. Ignored while airborne or after game over.
    /// Returns true if a jump started.
    pub fn request_jump(&mut self) -> bool {
        if self.status == GameStatus::Over {
            return false;
        }
        let started = self.physics.start_jump(&self.config);
        if started {
            tracing::debug!(frame = self.frame, "jump");
        }
        started
    }

    /// Jump key went up.
    pub fn release_jump(&mut self) {
        self.physics.release_jump();
    }

    /// Start a fresh run with the same config.
    pub fn reset(&mut self) {
        self.physics = PhysicsState::grounded(&self.config);
        self.obstacles.clear();
        self.score.reset();
        self.lives.reset();
        self.status = GameStatus::Running;
        self.cleared = 0;
        self.frame = 0;
        self.session += 1;
        tracing::info!(session = self.session, "runner reset");
    }

    /// Put an obstacle on the field directly, bypassing the spawn roll.
    /// Scripted scenarios use this to stage a collision.
    pub fn place_obstacle(&mut self, obstacle: Obstacle) {
        self.obstacles.push(obstacle);
    }

    pub fn snapshot(&self) -> RenderSnapshot {
        RenderSnapshot {
            player: self.physics.bounds(&self.config),
            obstacles: self
                .obstacles
                .obstacles()
                .iter()
                .map(|o| o.bounds())
                .collect(),
            score: self.displayed_score(),
            lives: self.lives.lives(),
            status: self.status,
            invincible: self.is_invincible(),
            jumping: self.physics.jumping,
            frame: self.frame,
            session: self.session,
        }
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
