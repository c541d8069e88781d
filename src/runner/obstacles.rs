//! Obstacle spawning, scrolling and removal.

use super::collision::{collides, Bounds};
use super::config::EngineConfig;
use rand::Rng;

/// A single obstacle. Anchored at its base: the box spans `y - height ..= y`.
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    /// Left edge, decreasing every frame.
    pub x: f64,
    /// Base (bottom edge).
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Bonus already paid for clearing this obstacle.
    pub scored: bool,
}

impl Obstacle {
    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.x, self.y - self.height, self.width, self.height)
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn is_offscreen(&self) -> bool {
        self.x <= -self.width
    }
}

/// Lifetime counters. `spawned == live + pruned + hit` always holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldStats {
    pub spawned: u64,
    /// Scrolled off the left edge.
    pub pruned: u64,
    /// Removed after hitting the player.
    pub hit: u64,
}

/// Live obstacles in spawn order (leftmost first).
#[derive(Debug, Clone, Default)]
pub struct ObstacleField {
    obstacles: Vec<Obstacle>,
    stats: FieldStats,
}

impl ObstacleField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn stats(&self) -> FieldStats {
        self.stats
    }

    /// Append an obstacle at the right edge of the field.
    pub fn push(&mut self, obstacle: Obstacle) {
        self.stats.spawned += 1;
        self.obstacles.push(obstacle);
    }

    /// Roll the per-frame spawn chance. Returns true if an obstacle was added.
    pub fn maybe_spawn<R: Rng>(&mut self, config: &EngineConfig, rng: &mut R) -> bool {
        if config.spawn_chance <= 0.0 || rng.gen::<f64>() >= config.spawn_chance {
            return false;
        }

        let height = if config.obstacle_height_range > 0.0 {
            config.obstacle_min_height + rng.gen_range(0.0..config.obstacle_height_range)
        } else {
            config.obstacle_min_height
        };

        self.push(Obstacle {
            x: config.field_width,
            y: config.field_height - config.obstacle_lift,
            width: config.obstacle_width,
            height,
            scored: false,
        });
        tracing::trace!(height, "spawned obstacle");
        true
    }

    /// Scroll every obstacle left.
    pub fn advance(&mut self, speed: f64) {
        for obstacle in &mut self.obstacles {
            obstacle.x -= speed;
        }
    }

    /// Mark obstacles whose right edge is fully behind `player_left` as cleared.
    /// Returns how many were newly cleared this call.
    pub fn mark_passed(&mut self, player_left: f64) -> u32 {
        let mut cleared = 0;
        for obstacle in &mut self.obstacles {
            if !obstacle.scored && obstacle.right() < player_left {
                obstacle.scored = true;
                cleared += 1;
            }
        }
        cleared
    }

    /// Remove and return the first obstacle overlapping `player`.
    pub fn take_collision(&mut self, player: &Bounds) -> Option<Obstacle> {
        let index = self.obstacles.iter().position(|o| collides(player, o))?;
        self.stats.hit += 1;
        Some(self.obstacles.remove(index))
    }

    /// True if any live obstacle overlaps `player`.
    pub fn any_collision(&self, player: &Bounds) -> bool {
        self.obstacles.iter().any(|o| collides(player, o))
    }

    /// Drop obstacles that have scrolled fully past the left edge.
    pub fn prune_offscreen(&mut self) -> usize {
        let before = self.obstacles.len();
        self.obstacles.retain(|o| !o.is_offscreen());
        let pruned = before - self.obstacles.len();
        self.stats.pruned += pruned as u64;
        pruned
    }

    pub fn clear(&mut self) {
        self.obstacles.clear();
        self.stats = FieldStats::default();
    }
}
