//! ControlChannel — the persistent duplex connection to the player server.
//!
//! One channel object exists for the lifetime of the client.  Visibility
//! transitions reconnect or disconnect it in place: suspend closes the
//! socket and tears the reader down (so nothing is delivered twice after a
//! resume), resume dials again only when the previous connection is gone.
//! At most one connection is ever live.
//!
//! Commands flow in through an mpsc receiver and are framed with the proto
//! codec; inbound frames are decoded by a reader task and forwarded as
//! `ServerEvent`s.  A dropped connection is not an error here — the UI just
//! goes stale until the next resume (the implicit reconnect).

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::tcp::OwnedWriteHalf;
use tokio::net::TcpStream;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use remote_proto::protocol::{Command, Message, ServerEvent};

pub struct ControlChannel {
    address: String,
    event_tx: mpsc::Sender<ServerEvent>,
    conn: Option<Conn>,
}

struct Conn {
    write: OwnedWriteHalf,
    reader: JoinHandle<()>,
}

impl ControlChannel {
    pub fn new(address: String, event_tx: mpsc::Sender<ServerEvent>) -> Self {
        Self {
            address,
            event_tx,
            conn: None,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.conn
            .as_ref()
            .is_some_and(|c| !c.reader.is_finished())
    }

    /// Connect, reusing the live connection when there is one.
    pub async fn connect(&mut self) -> anyhow::Result<()> {
        if self.is_connected() {
            debug!("channel already connected");
            return Ok(());
        }
        // A previous reader that has already exited is dead weight.
        self.teardown();

        let stream = TcpStream::connect(&self.address).await?;
        info!("channel connected to {}", self.address);
        let (read, write) = stream.into_split();

        let event_tx = self.event_tx.clone();
        let reader = tokio::spawn(async move {
            let mut read = read;
            let mut buffer: Vec<u8> = Vec::with_capacity(4096);
            let mut chunk = vec![0u8; 4096];
            loop {
                match read.read(&mut chunk).await {
                    Ok(0) => {
                        info!("channel closed by server");
                        break;
                    }
                    Ok(n) => {
                        buffer.extend_from_slice(&chunk[..n]);
                        // Drain every complete frame in the buffer.
                        while let Ok((msg, consumed)) = Message::decode(&buffer) {
                            buffer.drain(..consumed);
                            match msg {
                                Message::Event(event) => {
                                    if event_tx.send(event).await.is_err() {
                                        return;
                                    }
                                }
                                Message::Command(cmd) => {
                                    warn!(?cmd, "ignoring command frame from server");
                                }
                            }
                        }
                    }
                    Err(e) => {
                        warn!("channel read error: {}", e);
                        break;
                    }
                }
            }
        });

        self.conn = Some(Conn { write, reader });
        Ok(())
    }

    /// Close the connection and stop inbound delivery.
    pub fn disconnect(&mut self) {
        if self.conn.is_some() {
            info!("channel disconnected");
        }
        self.teardown();
    }

    fn teardown(&mut self) {
        if let Some(conn) = self.conn.take() {
            conn.reader.abort();
            // Dropping the write half closes the socket.
        }
    }

    /// Send a command.  Dropped silently when disconnected, like the
    /// original remote's emit-if-socket guard.
    pub async fn send(&mut self, cmd: Command) {
        if !self.is_connected() {
            debug!(?cmd, "channel disconnected, dropping command");
            return;
        }
        let Some(conn) = self.conn.as_mut() else {
            return;
        };
        let frame = match Message::Command(cmd).encode() {
            Ok(f) => f,
            Err(e) => {
                warn!("failed to encode command: {}", e);
                return;
            }
        };
        if let Err(e) = conn.write.write_all(&frame).await {
            warn!("channel write failed: {}", e);
            self.teardown();
        }
    }

    /// Single-owner loop: forwards outbound commands and follows the page
    /// visibility signal (hidden → disconnect, visible → reconnect).
    pub async fn run(
        mut self,
        mut cmd_rx: mpsc::Receiver<Command>,
        mut visibility_rx: watch::Receiver<bool>,
    ) {
        if let Err(e) = self.connect().await {
            warn!("initial connect failed: {}", e);
        }

        loop {
            tokio::select! {
                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(cmd) => self.send(cmd).await,
                        None => break,
                    }
                }
                changed = visibility_rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let hidden = *visibility_rx.borrow_and_update();
                    if hidden {
                        self.disconnect();
                    } else if let Err(e) = self.connect().await {
                        warn!("reconnect failed: {}", e);
                    }
                }
            }
        }

        self.disconnect();
    }
}
