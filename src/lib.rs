//! Hopper - terminal endless runner.
//!
//! The game rules live in [`runner`] and are independent of any screen or
//! input device; the terminal host (`main.rs`), the browser bridge
//! (`web`, behind the `web` feature) and the balance [`simulator`] all
//! drive the same [`runner::GameEngine`].

pub mod input;
pub mod runner;
pub mod settings;
pub mod simulator;
pub mod ui;
pub mod utils;

#[cfg(feature = "web")]
pub mod web;
