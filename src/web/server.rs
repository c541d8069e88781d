//! WebSocket server: screen bytes out, key events in.

use super::backend::FrameSender;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use futures_util::{SinkExt, StreamExt};
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{broadcast, mpsc};
use tokio_tungstenite::tungstenite::Message;

const CHANNEL_CAPACITY: usize = 100;

type InputSender = mpsc::Sender<KeyEvent>;
type InputReceiver = mpsc::Receiver<KeyEvent>;

/// Channels between the game loop and connected browsers.
pub struct WebServer {
    output_tx: FrameSender,
    input_tx: InputSender,
    input_rx: Mutex<InputReceiver>,
}

impl WebServer {
    pub fn new() -> Self {
        let (output_tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        let (input_tx, input_rx) = mpsc::channel(CHANNEL_CAPACITY);
        Self {
            output_tx,
            input_tx,
            input_rx: Mutex::new(input_rx),
        }
    }

    /// Sender for the terminal backend's [`TeeWriter`](super::TeeWriter).
    pub fn output_sender(&self) -> FrameSender {
        self.output_tx.clone()
    }

    /// Next key event from any browser, without blocking the game loop.
    pub fn try_recv_input(&self) -> Option<KeyEvent> {
        self.input_rx.try_lock().ok()?.try_recv().ok()
    }
}

impl Default for WebServer {
    fn default() -> Self {
        Self::new()
    }
}

/// Run the server on a background thread with its own tokio runtime.
pub fn spawn_web_server(port: u16, server: Arc<WebServer>) -> std::io::Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()?;

    std::thread::Builder::new()
        .name("hopper-web".to_string())
        .spawn(move || {
            if let Err(e) = runtime.block_on(start_web_server(port, server)) {
                tracing::error!(port, error = %e, "web server stopped");
            }
        })?;
    Ok(())
}

/// Accept browser connections until the listener fails.
pub async fn start_web_server(port: u16, server: Arc<WebServer>) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(port, "web server listening");

    loop {
        match listener.accept().await {
            Ok((stream, addr)) => {
                let server = Arc::clone(&server);
                tokio::spawn(async move {
                    if let Err(e) = handle_connection(stream, addr, server).await {
                        tracing::warn!(%addr, error = %e, "connection error");
                    }
                });
            }
            Err(e) => tracing::warn!(error = %e, "accept error"),
        }
    }
}

async fn handle_connection(
    stream: TcpStream,
    addr: SocketAddr,
    server: Arc<WebServer>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Plain page load or WebSocket upgrade?
    let mut peek_buf = [0u8; 512];
    let n = stream.peek(&mut peek_buf).await?;
    let request = String::from_utf8_lossy(&peek_buf[..n]);
    if request.starts_with("GET / ") && !request.to_ascii_lowercase().contains("upgrade: websocket")
    {
        serve_html(stream).await?;
        return Ok(());
    }

    let ws_stream = tokio_tungstenite::accept_async(stream).await?;
    tracing::info!(%addr, "browser connected");

    let (mut ws_sender, mut ws_receiver) = ws_stream.split();
    let mut output_rx = server.output_tx.subscribe();
    let input_tx = server.input_tx.clone();

    let send_task = tokio::spawn(async move {
        loop {
            match output_rx.recv().await {
                Ok(data) => {
                    if ws_sender.send(Message::Binary(data)).await.is_err() {
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Closed) => break,
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::debug!(%addr, skipped, "browser lagging, frames dropped");
                }
            }
        }
    });

    while let Some(msg) = ws_receiver.next().await {
        match msg {
            Ok(Message::Text(text)) => match parse_key_message(&text) {
                Some(key) => {
                    if input_tx.send(key).await.is_err() {
                        break;
                    }
                }
                None => tracing::debug!(%addr, message = %text, "ignored browser message"),
            },
            Ok(Message::Close(_)) | Err(_) => break,
            _ => {}
        }
    }

    send_task.abort();
    tracing::info!(%addr, "browser disconnected");
    Ok(())
}

async fn serve_html(mut stream: TcpStream) -> std::io::Result<()> {
    use tokio::io::AsyncWriteExt;

    let html = include_str!("../../web/index.html");
    let response = format!(
        "HTTP/1.1 200 OK\r\nContent-Type: text/html; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        html.len(),
        html
    );
    stream.write_all(response.as_bytes()).await?;
    Ok(())
}

#[derive(Debug, Deserialize)]
struct KeyMessage {
    key: String,
    /// "down" (default) or "up".
    #[serde(rename = "type", default)]
    kind: Option<String>,
}

/// Parse a browser key message such as `{"key":" ","type":"down"}`.
///
/// `"up"` becomes a release event so holding the jump key works the same as
/// in a terminal that reports releases.
pub fn parse_key_message(json: &str) -> Option<KeyEvent> {
    let message: KeyMessage = serde_json::from_str(json).ok()?;

    let kind = match message.kind.as_deref() {
        None | Some("down") => KeyEventKind::Press,
        Some("up") => KeyEventKind::Release,
        Some("repeat") => KeyEventKind::Repeat,
        Some(_) => return None,
    };

    let code = match message.key.as_str() {
        "Escape" => KeyCode::Esc,
        "Enter" => KeyCode::Enter,
        "ArrowUp" | "Up" => KeyCode::Up,
        "Space" | "Spacebar" => KeyCode::Char(' '),
        s => {
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => KeyCode::Char(c),
                _ => return None,
            }
        }
    };

    Some(KeyEvent {
        code,
        modifiers: KeyModifiers::empty(),
        kind,
        state: KeyEventState::empty(),
    })
}
