//! Axis-aligned hit testing between the player and obstacles.

use super::obstacles::Obstacle;

/// An axis-aligned box in field units. `y` is the top edge; y grows downward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Strict overlap: boxes that only share an edge do not touch.
    pub fn overlaps(&self, other: &Bounds) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }
}

/// True if the player's box overlaps the obstacle's box.
///
/// The obstacle is anchored at its base: its box spans from
/// `obstacle.y - obstacle.height` up to `obstacle.y`.
pub fn collides(player: &Bounds, obstacle: &Obstacle) -> bool {
    player.overlaps(&obstacle.bounds())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obstacle(x: f64, base_y: f64, width: f64, height: f64) -> Obstacle {
        Obstacle {
            x,
            y: base_y,
            width,
            height,
            scored: false,
        }
    }

    #[test]
    fn test_overlapping_boxes_collide() {
        let player = Bounds::new(50.0, 180.0, 20.0, 20.0);
        // Spans x 40..80, y 140..200
        let obs = obstacle(40.0, 200.0, 40.0, 60.0);
        assert!(collides(&player, &obs));
    }

    #[test]
    fn test_obstacle_to_the_right_misses() {
        let player = Bounds::new(50.0, 180.0, 20.0, 20.0);
        let obs = obstacle(71.0, 200.0, 20.0, 60.0);
        assert!(!collides(&player, &obs));
    }

    #[test]
    fn test_touching_edges_do_not_collide() {
        let player = Bounds::new(50.0, 180.0, 20.0, 20.0);
        // Left edge exactly at the player's right edge
        let obs = obstacle(70.0, 200.0, 20.0, 60.0);
        assert!(!collides(&player, &obs));
        // Right edge exactly at the player's left edge
        let obs = obstacle(30.0, 200.0, 20.0, 60.0);
        assert!(!collides(&player, &obs));
    }

    #[test]
    fn test_player_above_obstacle_misses() {
        // Obstacle top is at 200 - 60 = 140; player bottom at 130
        let player = Bounds::new(50.0, 110.0, 20.0, 20.0);
        let obs = obstacle(50.0, 200.0, 20.0, 60.0);
        assert!(!collides(&player, &obs));

        // Player bottom just inside the obstacle top
        let player = Bounds::new(50.0, 121.0, 20.0, 20.0);
        assert!(collides(&player, &obs));
    }

    #[test]
    fn test_lifted_obstacle_lets_grounded_player_pass_under() {
        // Base 30 units above the floor: grounded player (y 180..200) sits below it
        let player = Bounds::new(50.0, 180.0, 20.0, 20.0);
        let obs = obstacle(50.0, 170.0, 20.0, 40.0);
        assert!(!collides(&player, &obs));
    }

    #[test]
    fn test_bounds_edges() {
        let b = Bounds::new(10.0, 20.0, 30.0, 40.0);
        assert!((b.right() - 40.0).abs() < f64::EPSILON);
        assert!((b.bottom() - 60.0).abs() < f64::EPSILON);
    }
}
