//! Terminal writer that mirrors every flushed frame to browser clients.

use std::io::{self, Stdout, Write};
use tokio::sync::broadcast;

/// Output channel shared with the WebSocket server.
pub type FrameSender = broadcast::Sender<Vec<u8>>;

/// Writes to stdout and, on flush, broadcasts the bytes written since the
/// previous flush. ratatui flushes once per drawn frame, so each message is
/// one complete screen update.
pub struct TeeWriter {
    stdout: Stdout,
    frames: FrameSender,
    pending: Vec<u8>,
}

impl TeeWriter {
    pub fn new(frames: FrameSender) -> Self {
        Self {
            stdout: io::stdout(),
            frames,
            pending: Vec::with_capacity(8192),
        }
    }
}

impl Write for TeeWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.stdout.write(buf)?;
        self.pending.extend_from_slice(&buf[..n]);
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.stdout.flush()?;
        if !self.pending.is_empty() {
            // No connected browser is not an error
            let _ = self.frames.send(std::mem::take(&mut self.pending));
        }
        Ok(())
    }
}
