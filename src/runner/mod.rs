//! Endless runner core.
//!
//! A player shape jumps over obstacles scrolling in from the right. The
//! engine is advanced one fixed frame at a time by a host that supplies a
//! clock reading and the current jump-key state, and forwards jump key
//! presses and releases as they happen.

pub mod clock;
pub mod collision;
pub mod config;
pub mod lives;
pub mod logic;
pub mod obstacles;
pub mod physics;
pub mod scoring;

pub use clock::{FrameClock, FRAME_MS};
pub use collision::{collides, Bounds};
pub use config::{EngineConfig, EngineOverrides, Variant};
pub use lives::{GameStatus, HitOutcome, LifeTracker};
pub use logic::{GameEngine, InputFlags, RenderSnapshot};
pub use obstacles::{FieldStats, Obstacle, ObstacleField};
pub use physics::PhysicsState;
pub use scoring::ScoreKeeper;
