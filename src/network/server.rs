use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio_tungstenite::{accept_async, tungstenite::Message};
use tracing::{error, info, warn};

use crate::error::ServerError;
use crate::protocol::{ClientCommand, EngineSnapshot, ServerMessage};

/// Channel for sending serialized frames to the connected client.
type FrameTx = mpsc::UnboundedSender<Vec<u8>>;

/// Decode one binary frame from the client.
pub fn decode_command(bytes: &[u8]) -> Result<ClientCommand, rmp_serde::decode::Error> {
    rmp_serde::from_slice(bytes)
}

/// Encode a message for the client as named-field msgpack.
pub fn encode_message(msg: &ServerMessage) -> Result<Vec<u8>, rmp_serde::encode::Error> {
    rmp_serde::to_vec_named(msg)
}

/// The engine's network front.
///
/// Serves a single WebSocket client: snapshots go out, `ClientCommand`s come
/// in and queue up until the tick loop drains them.
pub struct GameServer {
    /// Feeds the write task. Dropped once the client goes away.
    client_tx: Option<FrameTx>,

    /// Decoded commands, drained by the tick loop between ticks.
    pub command_rx: mpsc::UnboundedReceiver<ClientCommand>,

    /// Held so `command_rx` stays open after the read task exits.
    _command_tx: mpsc::UnboundedSender<ClientCommand>,
}

impl GameServer {
    /// Bind `addr` and wait for exactly one WebSocket client. Once it has
    /// connected, two background tasks are spawned:
    ///
    /// 1. **Write task** – forwards serialized frames from `client_tx` to the
    ///    WebSocket sink.
    /// 2. **Read task** – decodes binary frames as `ClientCommand` and pushes
    ///    them onto the command channel.
    pub async fn start(addr: &str) -> Result<Self, ServerError> {
        let (command_tx, command_rx) = mpsc::unbounded_channel::<ClientCommand>();

        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| ServerError::Bind {
                addr: addr.to_string(),
                source,
            })?;

        info!("Minion manager listening on ws://{}", addr);
        info!("Waiting for a client connection...");

        let (stream, peer) = listener.accept().await.map_err(ServerError::Accept)?;
        info!("Client connected from {}", peer);

        let ws_stream = accept_async(stream).await?;
        let (mut ws_write, mut ws_read) = ws_stream.split();

        let (client_tx, mut client_rx) = mpsc::unbounded_channel::<Vec<u8>>();

        // ── Write task ──────────────────────────────────────────────
        tokio::spawn(async move {
            while let Some(bytes) = client_rx.recv().await {
                if let Err(e) = ws_write.send(Message::Binary(bytes.into())).await {
                    error!("Failed to send WebSocket message: {}", e);
                    break;
                }
            }
            info!("Write task shutting down");
        });

        // ── Read task ───────────────────────────────────────────────
        let read_tx = command_tx.clone();
        tokio::spawn(async move {
            while let Some(result) = ws_read.next().await {
                let msg = match result {
                    Ok(msg) => msg,
                    Err(e) => {
                        error!("WebSocket read error: {}", e);
                        break;
                    }
                };
                if !msg.is_binary() {
                    continue;
                }
                match decode_command(&msg.into_data()) {
                    Ok(command) => {
                        if let Err(e) = read_tx.send(command) {
                            warn!("Command channel closed: {}", e);
                            break;
                        }
                    }
                    Err(e) => warn!("Failed to decode ClientCommand: {}", e),
                }
            }
            info!("Read task shutting down");
        });

        Ok(Self {
            client_tx: Some(client_tx),
            command_rx,
            _command_tx: command_tx,
        })
    }

    pub fn is_connected(&self) -> bool {
        self.client_tx.is_some()
    }

    /// Everything the client sent since the last drain, in arrival order.
    pub fn drain_commands(&mut self) -> Vec<ClientCommand> {
        let mut commands = Vec::new();
        while let Ok(command) = self.command_rx.try_recv() {
            commands.push(command);
        }
        commands
    }

    pub fn send_snapshot(&mut self, snapshot: EngineSnapshot) {
        self.send_message(&ServerMessage::Snapshot(snapshot));
    }

    pub fn send_rejection(&mut self, reason: String) {
        self.send_message(&ServerMessage::Rejected { reason });
    }

    /// Send any `ServerMessage`. A no-op once the client has gone.
    pub fn send_message(&mut self, msg: &ServerMessage) {
        let Some(tx) = &self.client_tx else {
            return;
        };
        match encode_message(msg) {
            Ok(bytes) => {
                if tx.send(bytes).is_err() {
                    warn!("Client disconnected, stopping sends");
                    self.client_tx = None;
                }
            }
            Err(e) => error!("Failed to serialize ServerMessage: {}", e),
        }
    }
}
