//! Browser bridge for Hopper.
//!
//! Streams the terminal screen to browsers over WebSocket and feeds their
//! key presses and releases back into the game. The game still runs in the
//! local terminal; the browser is a remote view.
//!
//! ## Usage
//!
//! ```sh
//! cargo build --features web
//! ./target/debug/hopper --serve        # Default port 3000
//! ./target/debug/hopper --serve=8080   # Custom port
//! ```
//!
//! Then open http://localhost:3000 in your browser.

mod backend;
mod server;

pub use backend::TeeWriter;
pub use server::{parse_key_message, spawn_web_server, start_web_server, WebServer};
